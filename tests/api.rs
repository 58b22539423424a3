mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::*;
use devboard_server::api::{create_router, AppState};
use devboard_server::dashboard::Dashboard;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn unconfigured_app() -> Router {
    create_router(AppState::new(Dashboard::default()), "")
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, cache_control, body)
}

#[tokio::test]
async fn test_list_routes_return_empty_arrays_without_credentials() {
    for uri in [
        "/activity",
        "/deployments",
        "/notifications",
        "/packages",
        "/projects",
        "/search",
        "/vercel",
        "/languages/devboard/breakdown",
    ] {
        let (status, _, body) = get(unconfigured_app(), uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, json!([]), "{}", uri);
    }
}

#[tokio::test]
async fn test_object_routes_return_empty_shapes_without_credentials() {
    let (status, _, body) = get(unconfigured_app(), "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"totalRepos": 0, "totalStars": 0, "followers": 0, "following": 0}));

    let (_, _, body) = get(unconfigured_app(), "/languages/devboard").await;
    assert_eq!(body, json!({}));

    let (status, cache_control, body) = get(unconfigured_app(), "/repo-details/devboard?branch=dev").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache_control.as_deref(), Some("no-store"));
    assert_eq!(body, json!({"workflows": [], "recentCommits": []}));
}

#[tokio::test]
async fn test_cache_control_headers() {
    let (_, cache_control, _) = get(unconfigured_app(), "/projects").await;
    assert_eq!(cache_control.as_deref(), Some("public, max-age=600"));

    let (_, cache_control, _) = get(unconfigured_app(), "/notifications").await;
    assert_eq!(cache_control.as_deref(), Some("public, max-age=60"));

    let (_, cache_control, _) = get(unconfigured_app(), "/search").await;
    assert_eq!(cache_control.as_deref(), Some("public, max-age=3600"));

    let (_, cache_control, _) = get(unconfigured_app(), "/stats").await;
    assert!(cache_control.is_none());
}

#[tokio::test]
async fn test_project_not_found() {
    let (status, _, body) = get(unconfigured_app(), "/projects/12345").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Project not found"}));

    let (status, _, _) = get(unconfigured_app(), "/projects/not-a-number").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_project_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_json(42, "answer", 0, "2020-01-01T00:00:00Z")))
        .mount(&server)
        .await;

    let app = create_router(AppState::new(dashboard(&server)), "");
    let (status, _, body) = get(app, "/projects/42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 42);
    assert_eq!(body["name"], "answer");
    assert_eq!(body["status"], "Live");
    assert_eq!(body["health"], 100);
}

#[tokio::test]
async fn test_repo_details_default_branch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/devboard/commits"))
        .and(wiremock::matchers::query_param("sha", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([commit_json("abcdef99", "Hello", None)])))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_router(AppState::new(dashboard(&server)), "");
    let (_, _, body) = get(app, "/repo-details/devboard?branch=").await;

    assert_eq!(body["workflows"], json!([]));
    assert_eq!(body["recentCommits"][0]["id"], "abcdef9");
    assert_eq!(body["recentCommits"][0]["type"], "commit");
}

#[tokio::test]
async fn test_base_path_nesting() {
    let app = || create_router(AppState::new(Dashboard::default()), "/api/");

    let (status, _, body) = get(app(), "/api/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _, _) = get(app(), "/projects").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = get(app(), "/livez").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_upstreams() {
    let (status, _, body) = get(unconfigured_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["upstreams"], json!({"github": false, "vercel": false}));

    let server = MockServer::start().await;
    let app = create_router(AppState::new(dashboard(&server)), "");
    let (_, _, body) = get(app, "/health").await;
    assert_eq!(body["status"], "healthy");

    let (_, _, body) = get(unconfigured_app(), "/livez").await;
    assert_eq!(body, json!({"status": "alive"}));
}
