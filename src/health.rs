use crate::api::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

/// Health check status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub upstreams: UpstreamChecks,
}

/// Which upstreams have credentials configured
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamChecks {
    pub github: bool,
    pub vercel: bool,
}

/// Liveness probe response (minimal, just indicates the process is running)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/livez", get(liveness_check))
}

/// Unconfigured upstreams are reported as degraded but still answer 200:
/// the service keeps serving empty data for them.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let upstreams = UpstreamChecks {
        github: state.dashboard.has_github(),
        vercel: state.dashboard.has_vercel(),
    };

    let status = if upstreams.github && upstreams.vercel {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        upstreams,
    };

    (StatusCode::OK, Json(response))
}

async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}
