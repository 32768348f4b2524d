//! Commitflow GitHub - GitHub integration for Commitflow
//!
//! This crate provides GitHub API access for fetching pull request diffs
//! and creating comments. [`GitHubClient`] implements the core's
//! `DiffSource` and `CommentSink` capabilities.

mod client;
mod comment;
mod diff;
mod error;

pub use client::{parse_github_url, GitHubClient};
pub use comment::PostedComment;
pub use error::{Error, Result};
