use chrono::{DateTime, Utc};
use serde::Deserialize;

// GitHub API response structures
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub pushed_at: Option<DateTime<Utc>>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    pub homepage: Option<String>,
    pub default_branch: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubProfile {
    pub login: String,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUserRef {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct GitHubSearchResults<T> {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Pull request as returned by the issue search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubIssueItem {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub state: String,
    pub repository_url: String,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubNotification {
    pub id: String,
    pub subject: GitHubNotificationSubject,
    pub repository: GitHubNotificationRepo,
    pub updated_at: DateTime<Utc>,
    pub unread: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubNotificationSubject {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubNotificationRepo {
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubDeployment {
    pub id: u64,
    pub sha: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub environment: String,
    pub description: Option<String>,
    pub creator: Option<GitHubUserRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRelease {
    pub id: u64,
    pub name: Option<String>,
    pub tag_name: String,
    pub html_url: String,
    pub published_at: Option<DateTime<Utc>>,
    pub author: Option<GitHubUserRef>,
    #[serde(default)]
    pub assets: Vec<GitHubReleaseAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubReleaseAsset {
    #[serde(default)]
    pub download_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommit {
    pub sha: String,
    pub commit: GitHubCommitDetail,
    pub author: Option<GitHubUserRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommitDetail {
    pub message: String,
    pub author: Option<GitHubCommitAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommitAuthor {
    pub name: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct GitHubWorkflowRuns {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub workflow_runs: Vec<GitHubWorkflowRun>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubWorkflowRun {
    pub id: u64,
    pub name: Option<String>,
    pub status: Option<String>,
    pub conclusion: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub head_commit: Option<GitHubHeadCommit>,
    pub actor: Option<GitHubUserRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubHeadCommit {
    pub message: Option<String>,
}

// Vercel API response structures
#[derive(Debug, Deserialize)]
pub struct VercelDeploymentsPage {
    #[serde(default)]
    pub deployments: Vec<VercelRawDeployment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VercelRawDeployment {
    pub uid: String,
    pub name: String,
    pub url: String,
    pub created: i64,
    pub state: Option<String>,
    /// Older deployment records only carry `readyState`
    #[serde(rename = "readyState")]
    pub ready_state: Option<String>,
    pub creator: Option<VercelCreator>,
    pub meta: Option<VercelRawMeta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VercelCreator {
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VercelRawMeta {
    pub github_commit_message: Option<String>,
    pub github_commit_ref: Option<String>,
    pub github_repo: Option<String>,
}
