use crate::error::{DashboardError, Result};
use crate::types::{VercelDeploymentsPage, VercelRawDeployment};
use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const API_BASE_URL: &str = "https://api.vercel.com";
const USER_AGENT: &str = concat!("devboard-server/", env!("CARGO_PKG_VERSION"));

/// Vercel REST client for the token owner's deployments
#[derive(Debug, Clone)]
pub struct VercelClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl VercelClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(API_BASE_URL, token, crate::github::DEFAULT_TIMEOUT)
    }

    pub fn with_base_url(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(DashboardError::MissingCredentials("VERCEL_TOKEN"));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| {
            DashboardError::ApiError(format!("Invalid Vercel base URL {}: {}", base_url, e))
        })?;

        Ok(VercelClient {
            client,
            base_url,
            token: token.to_string(),
        })
    }

    /// Base URL with the given path segments appended, keeping any path prefix
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DashboardError::ApiError(format!("Base URL cannot carry a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Latest deployments across every project of the account
    pub async fn list_deployments(&self, limit: u32) -> Result<Vec<VercelRawDeployment>> {
        let url = self.endpoint(&["v6", "deployments"])?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .query(&[("limit", limit.to_string())])
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await?;

        let rate_limit_remaining = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                let page: VercelDeploymentsPage = serde_json::from_str(&body)?;
                Ok(page.deployments)
            }
            StatusCode::NOT_FOUND => Err(DashboardError::NotFound(url.path().to_string())),
            status
                if status == StatusCode::TOO_MANY_REQUESTS
                    || (status == StatusCode::FORBIDDEN && rate_limit_remaining == Some(0)) =>
            {
                let reset = response
                    .headers()
                    .get("X-RateLimit-Reset")
                    .and_then(|h| h.to_str().ok())
                    .unwrap_or("unknown")
                    .to_string();
                Err(DashboardError::RateLimitExceeded(format!(
                    "Vercel API rate limit exceeded, resets at {}",
                    reset
                )))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(DashboardError::ApiError(format!(
                    "Vercel request to {} failed with status {}: {}",
                    url.path(),
                    status,
                    error_text
                )))
            }
        }
    }
}
