//! External capabilities the orchestrators depend on
//!
//! Transport lives behind these traits: fetching a diff, turning a diff
//! into prose, and creating comments. The GitHub and OpenAI integration
//! crates provide the production implementations; tests substitute
//! in-memory ones.

use async_trait::async_trait;

use crate::event::{IssueLocator, PullRequestLocator};
use crate::Result;

/// A comment that was created on a thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedComment {
    /// Comment id assigned by the platform
    pub id: u64,
    /// Browser URL of the comment
    pub html_url: String,
}

/// Fetches the textual diff of a pull request
#[async_trait]
pub trait DiffSource: Send + Sync {
    /// Fetch the diff, fresh, in diff format (not JSON metadata)
    async fn fetch_diff(&self, pr: &PullRequestLocator) -> Result<String>;
}

/// Turns a raw diff into a prose summary
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize the diff; the input is passed through whole, without
    /// chunking or truncation
    async fn summarize(&self, diff: &str) -> Result<String>;
}

/// Creates comments on issue threads
#[async_trait]
pub trait CommentSink: Send + Sync {
    /// Post `body` as a new comment on the thread
    async fn post_comment(&self, issue: &IssueLocator, body: &str) -> Result<CreatedComment>;
}
