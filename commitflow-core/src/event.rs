//! Webhook event model and payload decoding
//!
//! A delivery arrives as an event name (the `X-GitHub-Event` header) plus
//! a JSON payload. Decoding produces a [`WebhookEvent`] with a closed set
//! of payload variants: one per event the bot actually handles, and
//! [`EventPayload::Other`] for everything else. Handlers pattern-match on
//! the variant instead of probing raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::Result;

/// Sentinel used when a payload carries no `action` field
pub const UNKNOWN_ACTION: &str = "unknown";

/// Identifies a pull request by repository and number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestLocator {
    /// Repository owner login
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Pull request number
    pub number: u64,
}

impl PullRequestLocator {
    /// The issue thread backing this pull request
    ///
    /// Comments on a pull request live on its issue thread, which shares
    /// the pull request's number.
    pub fn issue(&self) -> IssueLocator {
        IssueLocator {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            number: self.number,
        }
    }
}

/// Identifies an issue thread (or a pull request's issue thread)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLocator {
    /// Repository owner login
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Issue or pull request number
    pub number: u64,
}

/// One webhook delivery, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEvent {
    /// Event name, e.g. `pull_request`
    pub kind: String,
    /// Payload action, or [`UNKNOWN_ACTION`] when the payload has none
    pub action: String,
    /// Typed payload for handled events, `Other` for the rest
    pub payload: EventPayload,
}

/// Typed payloads for the events the bot handles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    /// A pull request was opened
    PullRequestOpened {
        /// The pull request that was opened
        pr: PullRequestLocator,
    },
    /// A review comment was created on a pull request
    ReviewCommentCreated {
        /// The comment text
        body: String,
        /// The pull request's issue thread
        thread: IssueLocator,
    },
    /// An issue was opened
    IssueOpened {
        /// The issue that was opened
        issue: IssueLocator,
    },
    /// A comment was created on an issue thread
    IssueCommentCreated {
        /// The comment text
        body: String,
        /// The thread the comment was posted on
        issue: IssueLocator,
    },
    /// Any event the bot does not handle
    Other,
}

impl WebhookEvent {
    /// Decode a delivery from its event name and JSON payload
    ///
    /// Unrecognized `(kind, action)` combinations decode to
    /// [`EventPayload::Other`]; a malformed payload for a recognized
    /// combination is an error.
    pub fn decode(kind: &str, payload: &Value) -> Result<Self> {
        let action = match payload.get("action").and_then(Value::as_str) {
            Some(action) => action.to_string(),
            None => {
                warn!(event = %kind, "Payload has no action field, using sentinel");
                UNKNOWN_ACTION.to_string()
            }
        };

        let payload = match (kind, action.as_str()) {
            ("pull_request", "opened") => {
                let raw: RawPullRequestEvent = serde_json::from_value(payload.clone())?;
                EventPayload::PullRequestOpened {
                    pr: PullRequestLocator {
                        owner: raw.repository.owner.login,
                        repo: raw.repository.name,
                        number: raw.pull_request.number,
                    },
                }
            }
            ("pull_request_review_comment", "created") => {
                let raw: RawReviewCommentEvent = serde_json::from_value(payload.clone())?;
                EventPayload::ReviewCommentCreated {
                    body: raw.comment.body,
                    thread: IssueLocator {
                        owner: raw.repository.owner.login,
                        repo: raw.repository.name,
                        number: raw.pull_request.number,
                    },
                }
            }
            ("issues", "opened") => {
                let raw: RawIssueEvent = serde_json::from_value(payload.clone())?;
                EventPayload::IssueOpened {
                    issue: IssueLocator {
                        owner: raw.repository.owner.login,
                        repo: raw.repository.name,
                        number: raw.issue.number,
                    },
                }
            }
            ("issue_comment", "created") => {
                let raw: RawIssueCommentEvent = serde_json::from_value(payload.clone())?;
                EventPayload::IssueCommentCreated {
                    body: raw.comment.body,
                    issue: IssueLocator {
                        owner: raw.repository.owner.login,
                        repo: raw.repository.name,
                        number: raw.issue.number,
                    },
                }
            }
            _ => EventPayload::Other,
        };

        Ok(Self {
            kind: kind.to_string(),
            action,
            payload,
        })
    }
}

// Minimal views of the webhook payloads; everything else in the
// delivery is ignored.

#[derive(Debug, Deserialize)]
struct RawAccount {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    name: String,
    owner: RawAccount,
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct RawComment {
    body: String,
}

#[derive(Debug, Deserialize)]
struct RawPullRequestEvent {
    repository: RawRepository,
    pull_request: RawPullRequest,
}

#[derive(Debug, Deserialize)]
struct RawReviewCommentEvent {
    repository: RawRepository,
    pull_request: RawPullRequest,
    comment: RawComment,
}

#[derive(Debug, Deserialize)]
struct RawIssueEvent {
    repository: RawRepository,
    issue: RawIssue,
}

#[derive(Debug, Deserialize)]
struct RawIssueCommentEvent {
    repository: RawRepository,
    issue: RawIssue,
    comment: RawComment,
}
