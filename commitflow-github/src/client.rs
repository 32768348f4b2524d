//! GitHub API client using octocrab

use crate::{Error, Result};
use commitflow_core::Secrets;
use octocrab::Octocrab;
use tracing::info;

/// GitHub API client
///
/// Not bound to a single repository; webhook deliveries name the
/// repository they concern, so every operation takes a locator.
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Create a new GitHub client
    ///
    /// Token is loaded from (in priority order):
    /// 1. GITHUB_TOKEN environment variable
    /// 2. ~/.config/commitflow/secrets.toml
    pub fn new() -> Result<Self> {
        // Load secrets (handles env var and secrets file)
        let secrets = Secrets::load().map_err(|e| Error::Auth(e.to_string()))?;

        let token = secrets.github_token().ok_or_else(|| {
            Error::Auth(
                "GitHub token not found. Set GITHUB_TOKEN environment variable \
                 or add token to ~/.config/commitflow/secrets.toml"
                    .to_string(),
            )
        })?;

        Self::with_token(token)
    }

    /// Create a client from an explicit token
    pub fn with_token(token: impl Into<String>) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!("Created GitHub client");

        Ok(Self { client })
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient").finish_non_exhaustive()
    }
}

/// Parse a repository reference into owner and repo
///
/// Supports formats:
/// - owner/repo
/// - https://github.com/owner/repo
pub fn parse_github_url(url: &str) -> Result<(String, String)> {
    // Handle browser URL: https://github.com/owner/repo
    if url.starts_with("https://") || url.starts_with("http://") {
        let url = url::Url::parse(url).map_err(|e| Error::Parse(e.to_string()))?;
        let path = url.path().trim_start_matches('/').trim_end_matches(".git");
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() >= 2 {
            return Ok((parts[0].to_string(), parts[1].to_string()));
        }
        return Err(Error::Parse(format!("Invalid GitHub URL path: {}", path)));
    }

    // Simple owner/repo format
    let parts: Vec<&str> = url.split('/').collect();
    if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
        return Ok((
            parts[0].to_string(),
            parts[1].trim_end_matches(".git").to_string(),
        ));
    }

    Err(Error::Parse(format!(
        "Invalid repository format: {}. Expected owner/repo",
        url
    )))
}
