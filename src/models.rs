use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse repository status shown on project cards
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProjectStatus {
    Live,
    Building,
    Error,
}

/// Repository as the dashboard sees it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub status: ProjectStatus,
    pub health: u8,
    pub updated: String,
    #[serde(rename = "type")]
    pub language: String,
    pub branch: String,
    pub stars: u64,
    pub issues: u64,
    pub url: String,
    pub homepage: Option<String>,
    #[serde(rename = "desc")]
    pub description: Option<String>,
}

/// Account-wide counters
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    #[serde(rename = "totalRepos")]
    pub total_repos: u64,
    #[serde(rename = "totalStars")]
    pub total_stars: u64,
    pub followers: u64,
    pub following: u64,
}

/// Pull request summary for the activity feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityItem {
    pub id: u64,
    pub title: String,
    pub repo: String,
    pub number: u64,
    pub state: String,
    pub created_at: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub repo: String,
    pub updated_at: DateTime<Utc>,
    pub read: bool,
}

/// Entry of the legacy GitHub deployments feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepoDeployment {
    pub id: u64,
    pub sha: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub task: String,
    pub environment: String,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "repoName")]
    pub repo_name: String,
}

/// Distinguishes CI runs from the raw commits used as a fallback
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Workflow,
    Commit,
}

/// One line of the build terminal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineEntry {
    pub id: String,
    pub name: String,
    pub status: String,
    pub conclusion: String,
    pub time: String,
    pub commit: String,
    pub actor: Option<String>,
    /// Whole seconds between creation and last update
    pub duration: u64,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Commits and CI runs for one repository branch
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RepoDetails {
    pub workflows: Vec<PipelineEntry>,
    #[serde(rename = "recentCommits")]
    pub recent_commits: Vec<PipelineEntry>,
}

impl RepoDetails {
    /// Entries to show in the build terminal: workflow runs when there are
    /// any, the raw commits otherwise.
    pub fn terminal_feed(&self) -> &[PipelineEntry] {
        if self.workflows.is_empty() {
            &self.recent_commits
        } else {
            &self.workflows
        }
    }
}

/// Latest release of a repository
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Package {
    pub id: u64,
    pub name: String,
    pub tag: String,
    pub repo: String,
    pub published_at: String,
    pub url: String,
    pub author: Option<String>,
    pub downloads: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum VercelState {
    Ready,
    Building,
    Error,
    Canceled,
    Queued,
}

impl VercelState {
    /// Maps a vendor state string, treating anything not yet terminal or
    /// unrecognized (e.g. `INITIALIZING`) as queued.
    pub fn from_vendor(state: &str) -> Self {
        match state.to_ascii_uppercase().as_str() {
            "READY" => VercelState::Ready,
            "BUILDING" => VercelState::Building,
            "ERROR" => VercelState::Error,
            "CANCELED" => VercelState::Canceled,
            _ => VercelState::Queued,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VercelDeployment {
    pub uid: String,
    pub name: String,
    pub url: String,
    /// Creation time in epoch milliseconds
    pub created: i64,
    pub state: VercelState,
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<VercelMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VercelMeta {
    pub github_commit_message: Option<String>,
    pub github_commit_ref: Option<String>,
    pub github_repo: Option<String>,
}

/// Share of a repository's code written in one language
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    pub percentage: f64,
}
