//! Issue comment creation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::models::issues::Comment as OctocrabComment;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use commitflow_core::capability::{CommentSink, CreatedComment};
use commitflow_core::event::IssueLocator;

use crate::{Error, GitHubClient, Result};

/// A comment created on an issue or pull request thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostedComment {
    /// Comment ID
    pub id: u64,
    /// Browser URL of the comment
    pub html_url: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

impl From<OctocrabComment> for PostedComment {
    fn from(comment: OctocrabComment) -> Self {
        PostedComment {
            id: comment.id.0,
            html_url: comment.html_url.to_string(),
            created_at: comment.created_at,
        }
    }
}

impl GitHubClient {
    /// Create a comment on an issue or pull request thread
    ///
    /// Pull request threads use the pull request's number.
    pub async fn create_comment(
        &self,
        issue: &IssueLocator,
        body: &str,
    ) -> Result<PostedComment> {
        debug!(
            owner = %issue.owner,
            repo = %issue.repo,
            number = issue.number,
            "Creating comment"
        );

        let comment = self
            .client()
            .issues(&issue.owner, &issue.repo)
            .create_comment(issue.number, body)
            .await
            .map_err(|e| match &e {
                octocrab::Error::GitHub { source, .. }
                    if source.message.contains("Not Found") =>
                {
                    Error::IssueNotFound(issue.number)
                }
                octocrab::Error::GitHub { source, .. }
                    if source.message.contains("Bad credentials") =>
                {
                    Error::Auth("Invalid GitHub token".to_string())
                }
                _ => Error::Api(e),
            })?;

        let posted = PostedComment::from(comment);

        info!(
            number = issue.number,
            comment_id = posted.id,
            "Created comment"
        );

        Ok(posted)
    }
}

#[async_trait]
impl CommentSink for GitHubClient {
    async fn post_comment(
        &self,
        issue: &IssueLocator,
        body: &str,
    ) -> commitflow_core::Result<CreatedComment> {
        let posted = self
            .create_comment(issue, body)
            .await
            .map_err(|e| commitflow_core::Error::CommentCreate(e.to_string()))?;

        Ok(CreatedComment {
            id: posted.id,
            html_url: posted.html_url,
        })
    }
}
