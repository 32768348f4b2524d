//! Pull request diff summarization
//!
//! When a pull request is opened: fetch its diff, summarize it, and post
//! one comment containing the diff and the summary. Any failing step
//! aborts the pipeline and no comment is created.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::capability::{CommentSink, CreatedComment, DiffSource, Summarizer};
use crate::event::{EventPayload, PullRequestLocator, WebhookEvent};
use crate::router::Handler;
use crate::Result;

/// Orchestrates diff fetch, summarization and the result comment
pub struct PullRequestSummarizer {
    diffs: Arc<dyn DiffSource>,
    summarizer: Arc<dyn Summarizer>,
    comments: Arc<dyn CommentSink>,
}

impl PullRequestSummarizer {
    /// Create a summarizer over the given capabilities
    pub fn new(
        diffs: Arc<dyn DiffSource>,
        summarizer: Arc<dyn Summarizer>,
        comments: Arc<dyn CommentSink>,
    ) -> Self {
        Self {
            diffs,
            summarizer,
            comments,
        }
    }

    /// Summarize one pull request and post the summary comment
    ///
    /// Steps run sequentially; the first failure propagates and nothing
    /// is posted.
    pub async fn summarize_pull_request(
        &self,
        pr: &PullRequestLocator,
    ) -> Result<CreatedComment> {
        debug!(
            owner = %pr.owner,
            repo = %pr.repo,
            number = pr.number,
            "Fetching pull request diff"
        );
        let diff = self.diffs.fetch_diff(pr).await?;
        debug!(bytes = diff.len(), "Fetched diff");

        let summary = self.summarizer.summarize(&diff).await?;
        debug!(bytes = summary.len(), "Generated summary");

        let body = compose_summary_comment(&diff, &summary);
        let posted = self.comments.post_comment(&pr.issue(), &body).await?;

        info!(
            number = pr.number,
            comment_id = posted.id,
            "Posted diff summary comment"
        );

        Ok(posted)
    }
}

#[async_trait]
impl Handler for PullRequestSummarizer {
    async fn handle(&self, event: &WebhookEvent) -> Result<()> {
        if let EventPayload::PullRequestOpened { pr } = &event.payload {
            self.summarize_pull_request(pr).await?;
        }
        Ok(())
    }
}

/// Lay out the comment body: the diff fenced verbatim, then the summary
fn compose_summary_comment(diff: &str, summary: &str) -> String {
    format!("Diff:\n```{}```\nSummary:\n{}", diff, summary)
}
