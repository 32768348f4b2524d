//! Pull request diff fetching

use async_trait::async_trait;
use tracing::debug;

use commitflow_core::capability::DiffSource;
use commitflow_core::event::PullRequestLocator;

use crate::{Error, GitHubClient, Result};

impl GitHubClient {
    /// Fetch the diff of a pull request
    ///
    /// Requests the diff media type (`application/vnd.github.diff`) so
    /// the response is the raw unified diff, not the JSON metadata.
    pub async fn get_pr_diff(&self, pr: &PullRequestLocator) -> Result<String> {
        debug!(
            owner = %pr.owner,
            repo = %pr.repo,
            number = pr.number,
            "Fetching pull request diff"
        );

        let diff = self
            .client()
            .pulls(&pr.owner, &pr.repo)
            .get_diff(pr.number)
            .await
            .map_err(|e| match &e {
                octocrab::Error::GitHub { source, .. }
                    if source.message.contains("Not Found") =>
                {
                    Error::PrNotFound(pr.number)
                }
                octocrab::Error::GitHub { source, .. }
                    if source.message.contains("Bad credentials") =>
                {
                    Error::Auth("Invalid GitHub token".to_string())
                }
                _ => Error::Api(e),
            })?;

        debug!(bytes = diff.len(), "Fetched diff");

        Ok(diff)
    }
}

#[async_trait]
impl DiffSource for GitHubClient {
    async fn fetch_diff(&self, pr: &PullRequestLocator) -> commitflow_core::Result<String> {
        self.get_pr_diff(pr)
            .await
            .map_err(|e| commitflow_core::Error::DiffFetch(e.to_string()))
    }
}
