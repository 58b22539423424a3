//! Vendor record → dashboard entity mappings.
//!
//! Everything here is pure: no I/O, no clock reads (the caller passes `now`
//! where recency matters) and no failure paths. Missing vendor fields map to
//! fixed fallbacks so a sparse record still renders.

use crate::models::{
    ActivityItem, EntryKind, LanguageShare, Notification, PipelineEntry, Project, ProjectStatus,
    Package, RepoDeployment, UserStats, VercelDeployment, VercelMeta, VercelState,
};
use crate::types::{
    GitHubCommit, GitHubDeployment, GitHubIssueItem, GitHubNotification, GitHubProfile,
    GitHubRelease, GitHubRepo, GitHubWorkflowRun, VercelRawDeployment,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use url::Url;

pub const DEFAULT_LANGUAGE: &str = "Markdown";
pub const DEFAULT_BRANCH: &str = "main";
pub const NO_COMMIT_MESSAGE: &str = "No commit message";

/// More open issues than this marks a project as failing
const ERROR_ISSUE_THRESHOLD: u64 = 5;
const HEALTH_PENALTY_PER_ISSUE: u64 = 5;
const HEALTH_FLOOR: u64 = 50;
const BUILDING_WINDOW_HOURS: i64 = 24;
const MAX_LANGUAGE_SHARES: usize = 6;

/// `max(100 - 5 * open_issues, 50)`
pub fn health_score(open_issues: u64) -> u8 {
    let score = 100u64
        .saturating_sub(open_issues.saturating_mul(HEALTH_PENALTY_PER_ISSUE))
        .max(HEALTH_FLOOR);
    score as u8
}

/// Error wins over Building; a repository that was never pushed is never
/// Building.
pub fn project_status(
    open_issues: u64,
    pushed_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> ProjectStatus {
    if open_issues > ERROR_ISSUE_THRESHOLD {
        return ProjectStatus::Error;
    }

    let window = Duration::hours(BUILDING_WINDOW_HOURS);
    match pushed_at {
        Some(pushed) if now.signed_duration_since(pushed) < window => ProjectStatus::Building,
        _ => ProjectStatus::Live,
    }
}

/// Keeps the homepage only when it looks like a web URL
pub fn live_homepage(homepage: Option<&str>) -> Option<String> {
    homepage
        .filter(|h| h.starts_with("http"))
        .map(str::to_string)
}

pub fn project(repo: &GitHubRepo, now: DateTime<Utc>) -> Project {
    Project {
        id: repo.id,
        name: repo.name.clone(),
        status: project_status(repo.open_issues_count, repo.pushed_at, now),
        health: health_score(repo.open_issues_count),
        updated: repo.pushed_at.map(short_date).unwrap_or_default(),
        language: non_empty(repo.language.as_deref()).unwrap_or(DEFAULT_LANGUAGE).to_string(),
        branch: non_empty(repo.default_branch.as_deref()).unwrap_or(DEFAULT_BRANCH).to_string(),
        stars: repo.stargazers_count,
        issues: repo.open_issues_count,
        url: repo.html_url.clone(),
        homepage: live_homepage(repo.homepage.as_deref()),
        description: repo.description.clone(),
    }
}

/// Stars are summed over whatever repository page the caller fetched
pub fn user_stats(profile: &GitHubProfile, repos: &[GitHubRepo]) -> UserStats {
    UserStats {
        total_repos: profile.public_repos,
        total_stars: repos.iter().map(|r| r.stargazers_count).sum(),
        followers: profile.followers,
        following: profile.following,
    }
}

pub fn activity_item(pr: &GitHubIssueItem) -> ActivityItem {
    ActivityItem {
        id: pr.id,
        title: pr.title.clone(),
        repo: repo_name_from_url(&pr.repository_url),
        number: pr.number,
        state: pr.state.clone(),
        created_at: date(pr.created_at),
        url: pr.html_url.clone(),
    }
}

/// Last path segment of an API repository URL
/// (`https://api.github.com/repos/owner/name` → `name`).
pub fn repo_name_from_url(repository_url: &str) -> String {
    let from_url = Url::parse(repository_url).ok().and_then(|url| {
        url.path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(str::to_string))
    });

    from_url.unwrap_or_else(|| {
        repository_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(repository_url)
            .to_string()
    })
}

pub fn notification(raw: &GitHubNotification) -> Notification {
    Notification {
        id: raw.id.clone(),
        title: raw.subject.title.clone(),
        kind: raw.subject.kind.clone(),
        repo: raw.repository.full_name.clone(),
        updated_at: raw.updated_at,
        read: !raw.unread,
    }
}

pub fn repo_deployment(repo_name: &str, raw: &GitHubDeployment) -> RepoDeployment {
    RepoDeployment {
        id: raw.id,
        sha: raw.sha.clone(),
        git_ref: raw.git_ref.clone(),
        task: raw.task.clone(),
        environment: raw.environment.clone(),
        description: raw.description.clone(),
        creator: raw.creator.as_ref().map(|c| c.login.clone()),
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        repo_name: repo_name.to_string(),
    }
}

pub fn workflow_entry(run: &GitHubWorkflowRun) -> PipelineEntry {
    let elapsed = run.updated_at.signed_duration_since(run.created_at).num_seconds();

    PipelineEntry {
        id: run.id.to_string(),
        name: non_empty(run.name.as_deref()).unwrap_or("Workflow run").to_string(),
        status: run.status.clone().unwrap_or_else(|| "queued".to_string()),
        conclusion: run.conclusion.clone().unwrap_or_else(|| "pending".to_string()),
        time: timestamp(run.updated_at),
        commit: non_empty(run.head_commit.as_ref().and_then(|c| c.message.as_deref()))
            .unwrap_or(NO_COMMIT_MESSAGE)
            .to_string(),
        actor: run.actor.as_ref().map(|a| a.login.clone()),
        duration: elapsed.max(0) as u64,
        kind: EntryKind::Workflow,
    }
}

pub fn commit_entry(raw: &GitHubCommit) -> PipelineEntry {
    let author = raw.commit.author.as_ref();

    PipelineEntry {
        id: raw.sha.chars().take(7).collect(),
        name: "Commit pushed".to_string(),
        status: "completed".to_string(),
        conclusion: "success".to_string(),
        time: author.map(|a| timestamp(a.date)).unwrap_or_default(),
        commit: raw.commit.message.clone(),
        actor: raw
            .author
            .as_ref()
            .map(|a| a.login.clone())
            .or_else(|| author.map(|a| a.name.clone())),
        duration: 0,
        kind: EntryKind::Commit,
    }
}

pub fn package(repo_name: &str, release: &GitHubRelease) -> Package {
    Package {
        id: release.id,
        name: non_empty(release.name.as_deref()).unwrap_or(release.tag_name.as_str()).to_string(),
        tag: release.tag_name.clone(),
        repo: repo_name.to_string(),
        published_at: release.published_at.map(date).unwrap_or_default(),
        url: release.html_url.clone(),
        author: release.author.as_ref().map(|a| a.login.clone()),
        downloads: release.assets.iter().map(|a| a.download_count).sum(),
    }
}

pub fn vercel_deployment(raw: &VercelRawDeployment) -> VercelDeployment {
    let state = raw
        .state
        .as_deref()
        .or(raw.ready_state.as_deref())
        .map(VercelState::from_vendor)
        .unwrap_or(VercelState::Queued);

    VercelDeployment {
        uid: raw.uid.clone(),
        name: raw.name.clone(),
        url: raw.url.clone(),
        created: raw.created,
        state,
        creator: raw.creator.as_ref().and_then(|c| c.username.clone()),
        meta: raw.meta.as_ref().map(|m| VercelMeta {
            github_commit_message: m.github_commit_message.clone(),
            github_commit_ref: m.github_commit_ref.clone(),
            github_repo: m.github_repo.clone(),
        }),
    }
}

/// Largest languages first, at most six, empty when the repo has no code
pub fn language_breakdown(languages: &BTreeMap<String, u64>) -> Vec<LanguageShare> {
    let total: u64 = languages.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<LanguageShare> = languages
        .iter()
        .map(|(name, &bytes)| LanguageShare {
            name: name.clone(),
            bytes,
            percentage: bytes as f64 / total as f64 * 100.0,
        })
        .collect();

    shares.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.name.cmp(&b.name)));
    shares.truncate(MAX_LANGUAGE_SHARES);
    shares
}

/// `Jan 5`
pub fn short_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d").to_string()
}

/// `1/5/2024`
pub fn date(at: DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}

/// `1/5/2024, 3:04:05 PM`
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
