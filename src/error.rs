use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Upstream API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing credentials: {0}")]
    MissingCredentials(&'static str),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl DashboardError {
    /// True for the expected "nothing there" outcomes that should not be
    /// logged as upstream failures.
    pub fn is_absence(&self) -> bool {
        matches!(self, DashboardError::NotFound(_) | DashboardError::MissingCredentials(_))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
