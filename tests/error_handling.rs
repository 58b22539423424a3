use devboard_server::error::{DashboardError, Result};
use std::error::Error;

#[test]
fn test_error_display() {
    let error = DashboardError::RateLimitExceeded("Rate limit hit".to_string());
    assert_eq!(format!("{}", error), "Rate limit exceeded: Rate limit hit");

    let error = DashboardError::NotFound("/repositories/1".to_string());
    assert_eq!(format!("{}", error), "Resource not found: /repositories/1");

    let error = DashboardError::ApiError("API failed".to_string());
    assert_eq!(format!("{}", error), "Upstream API error: API failed");

    let error = DashboardError::MissingCredentials("VERCEL_TOKEN");
    assert_eq!(format!("{}", error), "Missing credentials: VERCEL_TOKEN");
}

#[test]
fn test_error_source() {
    let error = DashboardError::RateLimitExceeded("Rate limit hit".to_string());
    assert!(error.source().is_none());
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: DashboardError = io_error.into();
    assert!(matches!(error, DashboardError::IoError(_)));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: DashboardError = json_error.into();
    assert!(matches!(error, DashboardError::JsonError(_)));
}

#[test]
fn test_absence_classification() {
    assert!(DashboardError::NotFound("x".to_string()).is_absence());
    assert!(DashboardError::MissingCredentials("GITHUB_TOKEN").is_absence());
    assert!(!DashboardError::ApiError("boom".to_string()).is_absence());
    assert!(!DashboardError::RateLimitExceeded("later".to_string()).is_absence());
}

#[test]
fn test_result_type() {
    fn returns_error() -> Result<String> {
        Err(DashboardError::NotFound("Not found".to_string()))
    }

    assert!(returns_error().is_err());
}
