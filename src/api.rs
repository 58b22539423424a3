use crate::dashboard::Dashboard;
use crate::health;
use crate::normalize::DEFAULT_BRANCH;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Freshness hints, in seconds, for intermediary caches
pub const PROJECTS_MAX_AGE: u64 = 600;
pub const SEARCH_MAX_AGE: u64 = 3600;
pub const ACTIVITY_MAX_AGE: u64 = 600;
pub const NOTIFICATIONS_MAX_AGE: u64 = 60;
pub const PACKAGES_MAX_AGE: u64 = 3600;
pub const LANGUAGES_MAX_AGE: u64 = 3600;
pub const VERCEL_MAX_AGE: u64 = 60;

/// Shared router state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            start_time: Instant::now(),
        }
    }
}

/// Response for errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct BranchParams {
    pub branch: Option<String>,
}

/// Dashboard routes, optionally nested under `base_path`, plus the probes
pub fn create_router(state: AppState, base_path: &str) -> Router {
    let api = Router::new()
        .route("/activity", get(get_activity))
        .route("/deployments", get(get_deployments))
        .route("/languages/:name", get(get_languages))
        .route("/languages/:name/breakdown", get(get_language_breakdown))
        .route("/notifications", get(get_notifications))
        .route("/packages", get(get_packages))
        .route("/projects", get(get_projects))
        .route("/projects/:id", get(get_project))
        .route("/repo-details/:name", get(get_repo_details))
        .route("/search", get(get_search))
        .route("/stats", get(get_stats))
        .route("/vercel", get(get_vercel));

    let base = base_path.trim_matches('/');
    let routes = if base.is_empty() {
        api
    } else {
        Router::new().nest(&format!("/{}", base), api)
    };

    routes
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cached<T: Serialize>(max_age: u64, body: T) -> Response {
    (
        [(header::CACHE_CONTROL, format!("public, max-age={}", max_age))],
        Json(body),
    )
        .into_response()
}

async fn get_activity(State(state): State<AppState>) -> Response {
    cached(ACTIVITY_MAX_AGE, state.dashboard.recent_pull_requests().await)
}

async fn get_deployments(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.recent_deployments().await)
}

async fn get_languages(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    cached(LANGUAGES_MAX_AGE, state.dashboard.repo_languages(&name).await)
}

async fn get_language_breakdown(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    cached(LANGUAGES_MAX_AGE, state.dashboard.language_breakdown(&name).await)
}

async fn get_notifications(State(state): State<AppState>) -> Response {
    cached(NOTIFICATIONS_MAX_AGE, state.dashboard.notifications().await)
}

async fn get_packages(State(state): State<AppState>) -> Response {
    cached(PACKAGES_MAX_AGE, state.dashboard.packages().await)
}

async fn get_projects(State(state): State<AppState>) -> Response {
    cached(PROJECTS_MAX_AGE, state.dashboard.top_projects().await)
}

/// Non-numeric ids are reported the same way as unknown ones
async fn get_project(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let project = match id.parse::<u64>() {
        Ok(id) => state.dashboard.project_by_id(id).await,
        Err(_) => {
            debug!("Rejecting non-numeric project id {:?}", id);
            None
        }
    };

    match project {
        Some(project) => Json(project).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Project not found".to_string(),
            }),
        )
            .into_response(),
    }
}

async fn get_repo_details(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<BranchParams>,
) -> Response {
    let branch = params
        .branch
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BRANCH.to_string());

    let details = state.dashboard.repo_details(&name, &branch).await;
    ([(header::CACHE_CONTROL, "no-store")], Json(details)).into_response()
}

async fn get_search(State(state): State<AppState>) -> Response {
    cached(SEARCH_MAX_AGE, state.dashboard.all_projects().await)
}

async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.user_stats().await)
}

async fn get_vercel(State(state): State<AppState>) -> Response {
    cached(VERCEL_MAX_AGE, state.dashboard.vercel_deployments().await)
}
