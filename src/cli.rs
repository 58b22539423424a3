use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::vercel::VercelClient;
use clap::Parser;
use std::time::Duration;
use tracing::warn;

#[derive(Parser, Debug, Clone)]
#[command(name = "devboard-server")]
#[command(about = "Devboard API - Mirrors GitHub and Vercel state for the developer dashboard")]
#[command(version)]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Path prefix for the dashboard routes (e.g. /api)
    #[arg(long, env = "BASE_PATH", default_value = "")]
    pub base_path: String,

    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub account whose repositories are mirrored
    #[arg(long, env = "GITHUB_USERNAME")]
    pub github_username: Option<String>,

    /// Vercel API token
    #[arg(long, env = "VERCEL_TOKEN", hide_env_values = true)]
    pub vercel_token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = crate::github::API_BASE_URL)]
    pub github_api_url: String,

    /// Vercel API base URL
    #[arg(long, env = "VERCEL_API_URL", default_value = crate::vercel::API_BASE_URL)]
    pub vercel_api_url: String,

    /// Timeout for each upstream request, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    pub upstream_timeout: u64,
}

impl Cli {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }

    /// `None` unless both the token and the account name are set
    pub fn github_client(&self) -> Result<Option<GitHubClient>> {
        match (non_blank(&self.github_token), non_blank(&self.github_username)) {
            (Some(token), Some(username)) => GitHubClient::with_base_url(
                &self.github_api_url,
                token,
                username,
                self.upstream_timeout(),
            )
            .map(Some),
            (Some(_), None) | (None, Some(_)) => {
                warn!("GITHUB_TOKEN and GITHUB_USERNAME must both be set; GitHub data disabled");
                Ok(None)
            }
            (None, None) => Ok(None),
        }
    }

    pub fn vercel_client(&self) -> Result<Option<VercelClient>> {
        match non_blank(&self.vercel_token) {
            Some(token) => {
                VercelClient::with_base_url(&self.vercel_api_url, token, self.upstream_timeout())
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    pub fn dashboard(&self) -> Result<Dashboard> {
        Ok(Dashboard::new(self.github_client()?, self.vercel_client()?))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
