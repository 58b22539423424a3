use crate::error::{DashboardError, Result};
use crate::types::{
    GitHubCommit, GitHubDeployment, GitHubIssueItem, GitHubNotification, GitHubProfile,
    GitHubRelease, GitHubRepo, GitHubSearchResults, GitHubWorkflowRun, GitHubWorkflowRuns,
};
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("devboard-server/", env!("CARGO_PKG_VERSION"));
const LOW_RATE_LIMIT: u32 = 10;

/// GitHub REST client scoped to one account
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
    token: String,
    username: String,
}

impl GitHubClient {
    pub fn new(token: &str, username: &str) -> Result<Self> {
        Self::with_base_url(API_BASE_URL, token, username, DEFAULT_TIMEOUT)
    }

    /// Client against a custom base URL (GitHub Enterprise or a test server)
    pub fn with_base_url(
        base_url: &str,
        token: &str,
        username: &str,
        timeout: Duration,
    ) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(DashboardError::MissingCredentials("GITHUB_TOKEN"));
        }
        if username.trim().is_empty() {
            return Err(DashboardError::MissingCredentials("GITHUB_USERNAME"));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| {
            DashboardError::ApiError(format!("Invalid GitHub base URL {}: {}", base_url, e))
        })?;

        Ok(GitHubClient {
            client,
            base_url,
            token: token.to_string(),
            username: username.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Base URL with the given path segments appended, each percent-encoded
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

    fn repo_endpoint(&self, repo: &str, rest: &[&str]) -> Result<Url> {
        let mut segments = vec!["repos", self.username.as_str(), repo];
        segments.extend_from_slice(rest);
        self.endpoint(&segments)
    }

    /// Single attempt; every non-success status becomes an error
    async fn make_request(&self, url: Url, query: &[(&str, String)]) -> Result<Response> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .query(query)
            .header(header::ACCEPT, "application/vnd.github.v3+json")
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .send()
            .await?;

        let rate_limit_remaining = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        match response.status() {
            status if status.is_success() => {
                if let Some(remaining) = rate_limit_remaining.filter(|r| *r < LOW_RATE_LIMIT) {
                    warn!("GitHub rate limit low ({} remaining)", remaining);
                }
                Ok(response)
            }
            StatusCode::NOT_FOUND => Err(DashboardError::NotFound(url.path().to_string())),
            StatusCode::FORBIDDEN if rate_limit_remaining == Some(0) => {
                let reset = response
                    .headers()
                    .get("X-RateLimit-Reset")
                    .and_then(|h| h.to_str().ok())
                    .unwrap_or("unknown")
                    .to_string();
                Err(DashboardError::RateLimitExceeded(format!(
                    "GitHub API rate limit exceeded, resets at {}",
                    reset
                )))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(DashboardError::ApiError(format!(
                    "GitHub request to {} failed with status {}: {}",
                    url.path(),
                    status,
                    error_text
                )))
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        let response = self.make_request(url, query).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Most recently updated repositories first
    pub async fn list_recent_repos(&self, per_page: u32) -> Result<Vec<GitHubRepo>> {
        let url = self.endpoint(&["users", self.username.as_str(), "repos"])?;
        let query = [
            ("sort", "updated".to_string()),
            ("direction", "desc".to_string()),
            ("per_page", per_page.to_string()),
        ];
        self.get_json(url, &query).await
    }

    /// Repositories in the API's default order
    pub async fn list_repos(&self, per_page: u32) -> Result<Vec<GitHubRepo>> {
        let url = self.endpoint(&["users", self.username.as_str(), "repos"])?;
        self.get_json(url, &[("per_page", per_page.to_string())]).await
    }

    pub async fn get_user(&self) -> Result<GitHubProfile> {
        let url = self.endpoint(&["users", self.username.as_str()])?;
        self.get_json(url, &[]).await
    }

    pub async fn get_repository(&self, id: u64) -> Result<GitHubRepo> {
        let id = id.to_string();
        let url = self.endpoint(&["repositories", id.as_str()])?;
        self.get_json(url, &[]).await
    }

    /// Pull requests authored by the account, newest first
    pub async fn search_authored_pull_requests(&self, limit: u32) -> Result<Vec<GitHubIssueItem>> {
        let url = self.endpoint(&["search", "issues"])?;
        let query = [
            ("q", format!("author:{} type:pr", self.username)),
            ("sort", "created".to_string()),
            ("order", "desc".to_string()),
            ("per_page", limit.to_string()),
        ];
        let results: GitHubSearchResults<GitHubIssueItem> = self.get_json(url, &query).await?;
        Ok(results.items)
    }

    /// Read and unread notifications for the token's owner
    pub async fn list_notifications(&self, limit: u32) -> Result<Vec<GitHubNotification>> {
        let url = self.endpoint(&["notifications"])?;
        let query = [("all", "true".to_string()), ("per_page", limit.to_string())];
        self.get_json(url, &query).await
    }

    pub async fn list_deployments(&self, repo: &str) -> Result<Vec<GitHubDeployment>> {
        let url = self.repo_endpoint(repo, &["deployments"])?;
        self.get_json(url, &[]).await
    }

    /// `None` when the repository has never published a release
    pub async fn latest_release(&self, repo: &str) -> Result<Option<GitHubRelease>> {
        let url = self.repo_endpoint(repo, &["releases", "latest"])?;
        match self.get_json(url, &[]).await {
            Ok(release) => Ok(Some(release)),
            Err(DashboardError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn list_commits(
        &self,
        repo: &str,
        branch: &str,
        limit: u32,
    ) -> Result<Vec<GitHubCommit>> {
        let url = self.repo_endpoint(repo, &["commits"])?;
        let query = [("sha", branch.to_string()), ("per_page", limit.to_string())];
        self.get_json(url, &query).await
    }

    pub async fn list_workflow_runs(
        &self,
        repo: &str,
        branch: &str,
        limit: u32,
    ) -> Result<Vec<GitHubWorkflowRun>> {
        let url = self.repo_endpoint(repo, &["actions", "runs"])?;
        let query = [("branch", branch.to_string()), ("per_page", limit.to_string())];
        let runs: GitHubWorkflowRuns = self.get_json(url, &query).await?;
        Ok(runs.workflow_runs)
    }

    /// Bytes of code per language, as reported by GitHub
    pub async fn repo_languages(&self, repo: &str) -> Result<BTreeMap<String, u64>> {
        let url = self.repo_endpoint(repo, &["languages"])?;
        self.get_json(url, &[]).await
    }
}
