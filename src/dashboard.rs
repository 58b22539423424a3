//! Aggregators answering one dashboard question each.
//!
//! Every public method is infallible: upstream failures are logged and
//! collapse to the empty value of the return type, so a missing token or an
//! outage renders as "no data" rather than an error.

use crate::error::{DashboardError, Result};
use crate::github::GitHubClient;
use crate::models::{
    ActivityItem, LanguageShare, Notification, Package, Project, RepoDeployment, RepoDetails,
    UserStats, VercelDeployment,
};
use crate::normalize;
use crate::vercel::VercelClient;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub const TOP_PROJECTS: u32 = 10;
pub const ALL_PROJECTS: u32 = 100;
pub const RECENT_PULL_REQUESTS: u32 = 5;
pub const RECENT_NOTIFICATIONS: u32 = 5;
pub const DEPLOYMENT_REPOS: usize = 3;
pub const PACKAGE_REPOS: usize = 15;
pub const REPO_DETAIL_ENTRIES: u32 = 5;
pub const VERCEL_DEPLOYMENTS: u32 = 5;

/// Upper bound on concurrent upstream calls within one fan-out
const FAN_OUT_LIMIT: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    github: Option<GitHubClient>,
    vercel: Option<VercelClient>,
}

impl Dashboard {
    pub fn new(github: Option<GitHubClient>, vercel: Option<VercelClient>) -> Self {
        Self { github, vercel }
    }

    pub fn has_github(&self) -> bool {
        self.github.is_some()
    }

    pub fn has_vercel(&self) -> bool {
        self.vercel.is_some()
    }

    fn github(&self) -> Result<&GitHubClient> {
        self.github
            .as_ref()
            .ok_or(DashboardError::MissingCredentials("GITHUB_TOKEN and GITHUB_USERNAME"))
    }

    fn vercel(&self) -> Result<&VercelClient> {
        self.vercel
            .as_ref()
            .ok_or(DashboardError::MissingCredentials("VERCEL_TOKEN"))
    }

    /// Most recently updated repositories for the dashboard swimlane
    pub async fn top_projects(&self) -> Vec<Project> {
        recover("top projects", self.fetch_projects(TOP_PROJECTS).await)
    }

    /// Larger listing used by search and the repositories page
    pub async fn all_projects(&self) -> Vec<Project> {
        recover("all projects", self.fetch_projects(ALL_PROJECTS).await)
    }

    async fn fetch_projects(&self, per_page: u32) -> Result<Vec<Project>> {
        let repos = self.github()?.list_recent_repos(per_page).await?;
        let now = Utc::now();
        Ok(repos.iter().map(|repo| normalize::project(repo, now)).collect())
    }

    /// `None` for unknown ids and whenever GitHub cannot be reached
    pub async fn project_by_id(&self, id: u64) -> Option<Project> {
        recover("project lookup", self.fetch_project(id).await)
    }

    async fn fetch_project(&self, id: u64) -> Result<Option<Project>> {
        let repo = self.github()?.get_repository(id).await?;
        Ok(Some(normalize::project(&repo, Utc::now())))
    }

    /// Profile first, then repositories; stars are summed locally since the
    /// API has no aggregate for them.
    pub async fn user_stats(&self) -> UserStats {
        recover("user stats", self.fetch_user_stats().await)
    }

    async fn fetch_user_stats(&self) -> Result<UserStats> {
        let github = self.github()?;
        let profile = github.get_user().await?;
        let repos = github.list_repos(ALL_PROJECTS).await?;
        Ok(normalize::user_stats(&profile, &repos))
    }

    pub async fn recent_pull_requests(&self) -> Vec<ActivityItem> {
        recover("recent pull requests", self.fetch_pull_requests().await)
    }

    async fn fetch_pull_requests(&self) -> Result<Vec<ActivityItem>> {
        let prs = self
            .github()?
            .search_authored_pull_requests(RECENT_PULL_REQUESTS)
            .await?;
        Ok(prs
            .iter()
            .take(RECENT_PULL_REQUESTS as usize)
            .map(normalize::activity_item)
            .collect())
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        recover("notifications", self.fetch_notifications().await)
    }

    async fn fetch_notifications(&self) -> Result<Vec<Notification>> {
        let notifications = self.github()?.list_notifications(RECENT_NOTIFICATIONS).await?;
        Ok(notifications.iter().map(normalize::notification).collect())
    }

    /// Deployments of the three most recently updated repositories, newest
    /// first; ties order by repository name then id. A repository whose call
    /// fails contributes nothing.
    pub async fn recent_deployments(&self) -> Vec<RepoDeployment> {
        recover("recent deployments", self.fetch_recent_deployments().await)
    }

    async fn fetch_recent_deployments(&self) -> Result<Vec<RepoDeployment>> {
        let github = self.github()?;
        let projects = self.fetch_projects(TOP_PROJECTS).await?;

        let targets = projects.into_iter().take(DEPLOYMENT_REPOS);
        let per_repo: Vec<Vec<RepoDeployment>> = stream::iter(targets)
            .map(|project| async move {
                match github.list_deployments(&project.name).await {
                    Ok(deployments) => deployments
                        .iter()
                        .map(|d| normalize::repo_deployment(&project.name, d))
                        .collect::<Vec<_>>(),
                    Err(e) => {
                        log_failure(&format!("deployments for {}", project.name), &e);
                        Vec::new()
                    }
                }
            })
            .buffered(FAN_OUT_LIMIT)
            .collect()
            .await;

        let mut deployments: Vec<RepoDeployment> = per_repo.into_iter().flatten().collect();
        deployments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.repo_name.cmp(&b.repo_name))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(deployments)
    }

    /// Latest release of each of the first fifteen repositories, in
    /// repository order. Repositories without a release are left out.
    pub async fn packages(&self) -> Vec<Package> {
        recover("packages", self.fetch_packages().await)
    }

    async fn fetch_packages(&self) -> Result<Vec<Package>> {
        let github = self.github()?;
        let projects = self.fetch_projects(ALL_PROJECTS).await?;

        let targets = projects.into_iter().take(PACKAGE_REPOS);
        let releases: Vec<Option<Package>> = stream::iter(targets)
            .map(|project| async move {
                match github.latest_release(&project.name).await {
                    Ok(release) => release.map(|r| normalize::package(&project.name, &r)),
                    Err(e) => {
                        log_failure(&format!("latest release of {}", project.name), &e);
                        None
                    }
                }
            })
            .buffered(FAN_OUT_LIMIT)
            .collect()
            .await;

        let packages: Vec<Package> = releases.into_iter().flatten().collect();
        info!("Found {} published packages", packages.len());
        Ok(packages)
    }

    /// Recent commits and CI runs of one branch, fetched side by side. Each
    /// list degrades to empty on its own.
    pub async fn repo_details(&self, repo: &str, branch: &str) -> RepoDetails {
        let github = match self.github() {
            Ok(github) => github,
            Err(e) => return recover("repo details", Err(e)),
        };

        let (commits, runs) = tokio::join!(
            github.list_commits(repo, branch, REPO_DETAIL_ENTRIES),
            github.list_workflow_runs(repo, branch, REPO_DETAIL_ENTRIES),
        );

        let workflows = recover("workflow runs", runs)
            .iter()
            .take(REPO_DETAIL_ENTRIES as usize)
            .map(normalize::workflow_entry)
            .collect();
        let recent_commits = recover("commits", commits)
            .iter()
            .take(REPO_DETAIL_ENTRIES as usize)
            .map(normalize::commit_entry)
            .collect();

        RepoDetails {
            workflows,
            recent_commits,
        }
    }

    /// Byte count per language, passed through unchanged
    pub async fn repo_languages(&self, repo: &str) -> BTreeMap<String, u64> {
        let result = match self.github() {
            Ok(github) => github.repo_languages(repo).await,
            Err(e) => Err(e),
        };
        recover("repo languages", result)
    }

    pub async fn language_breakdown(&self, repo: &str) -> Vec<LanguageShare> {
        normalize::language_breakdown(&self.repo_languages(repo).await)
    }

    /// Latest deployments across every Vercel project
    pub async fn vercel_deployments(&self) -> Vec<VercelDeployment> {
        recover("vercel deployments", self.fetch_vercel_deployments().await)
    }

    async fn fetch_vercel_deployments(&self) -> Result<Vec<VercelDeployment>> {
        let deployments = self.vercel()?.list_deployments(VERCEL_DEPLOYMENTS).await?;
        Ok(deployments.iter().map(normalize::vercel_deployment).collect())
    }
}

fn log_failure(what: &str, error: &DashboardError) {
    if error.is_absence() {
        debug!("No {}: {}", what, error);
    } else {
        warn!("Failed to fetch {}: {}", what, error);
    }
}

/// Collapses a failed fetch into the empty value of its type
fn recover<T: Default>(what: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        log_failure(what, &e);
        T::default()
    })
}
