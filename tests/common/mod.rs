#![allow(dead_code)]

use devboard_server::dashboard::Dashboard;
use devboard_server::github::GitHubClient;
use devboard_server::vercel::VercelClient;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";
pub const USER: &str = "octo";
pub const VERCEL_TOKEN: &str = "vercel-token";

pub fn github_client(server: &MockServer) -> GitHubClient {
    GitHubClient::with_base_url(&server.uri(), TOKEN, USER, Duration::from_secs(5))
        .expect("Failed to create GitHub client")
}

pub fn vercel_client(server: &MockServer) -> VercelClient {
    VercelClient::with_base_url(&server.uri(), VERCEL_TOKEN, Duration::from_secs(5))
        .expect("Failed to create Vercel client")
}

/// Dashboard with both upstreams pointed at the mock server
pub fn dashboard(server: &MockServer) -> Dashboard {
    Dashboard::new(Some(github_client(server)), Some(vercel_client(server)))
}

pub fn repo_json(id: u64, name: &str, open_issues: u64, pushed_at: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "full_name": format!("{}/{}", USER, name),
        "description": format!("{} description", name),
        "html_url": format!("https://github.com/{}/{}", USER, name),
        "pushed_at": pushed_at,
        "language": "Rust",
        "stargazers_count": 3,
        "open_issues_count": open_issues,
        "homepage": null,
        "default_branch": "main",
        "private": false
    })
}

pub fn repos_json(names: &[&str]) -> Value {
    Value::Array(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| repo_json(i as u64 + 1, name, 0, "2020-01-01T00:00:00Z"))
            .collect(),
    )
}

pub fn release_json(id: u64, tag: &str, name: Option<&str>, downloads: &[u64]) -> Value {
    json!({
        "id": id,
        "name": name,
        "tag_name": tag,
        "html_url": format!("https://github.com/{}/repo/releases/tag/{}", USER, tag),
        "published_at": "2024-03-09T08:00:00Z",
        "author": {"login": USER, "id": 1},
        "assets": downloads
            .iter()
            .map(|d| json!({"name": "asset.tar.gz", "download_count": d}))
            .collect::<Vec<_>>()
    })
}

pub fn commit_json(sha: &str, message: &str, login: Option<&str>) -> Value {
    json!({
        "sha": sha,
        "commit": {
            "message": message,
            "author": {"name": "Octo Cat", "email": "octo@example.com", "date": "2024-01-05T15:04:05Z"}
        },
        "author": login.map(|l| json!({"login": l, "id": 7}))
    })
}

pub fn workflow_run_json(id: u64, name: &str, conclusion: Option<&str>) -> Value {
    let status = if conclusion.is_some() { "completed" } else { "in_progress" };
    json!({
        "id": id,
        "name": name,
        "status": status,
        "conclusion": conclusion,
        "created_at": "2024-01-05T15:00:00Z",
        "updated_at": "2024-01-05T15:02:30Z",
        "head_commit": {"id": "abc", "message": "Bump deps"},
        "actor": {"login": USER, "id": 1}
    })
}

pub fn deployment_json(id: u64, created_at: &str) -> Value {
    json!({
        "id": id,
        "sha": "0123456789abcdef",
        "ref": "main",
        "task": "deploy",
        "environment": "production",
        "description": null,
        "creator": {"login": USER, "id": 1},
        "created_at": created_at,
        "updated_at": created_at,
        "statuses_url": "https://api.github.com/statuses",
        "repository_url": "https://api.github.com/repos/octo/repo"
    })
}

pub fn pull_request_json(id: u64, number: u64, repo: &str) -> Value {
    json!({
        "id": id,
        "number": number,
        "title": format!("PR #{}", number),
        "state": "open",
        "repository_url": format!("https://api.github.com/repos/{}/{}", USER, repo),
        "html_url": format!("https://github.com/{}/{}/pull/{}", USER, repo, number),
        "created_at": "2024-02-03T10:00:00Z",
        "pull_request": {"url": "https://api.github.com/pulls/1"}
    })
}

pub fn notification_json(id: &str, unread: bool) -> Value {
    json!({
        "id": id,
        "unread": unread,
        "reason": "mention",
        "updated_at": "2024-02-03T10:00:00Z",
        "subject": {"title": "Fix the build", "type": "PullRequest", "url": null},
        "repository": {"full_name": format!("{}/devboard", USER)}
    })
}

pub fn vercel_deployment_json(uid: &str, state: &str) -> Value {
    json!({
        "uid": uid,
        "name": "devboard",
        "url": format!("{}.vercel.app", uid),
        "created": 1_700_000_000_000i64,
        "state": state,
        "readyState": state,
        "type": "LAMBDAS",
        "creator": {"uid": "u1", "username": "octo"},
        "meta": {"githubCommitMessage": "Ship it", "githubCommitRef": "main", "githubRepo": "devboard"}
    })
}
