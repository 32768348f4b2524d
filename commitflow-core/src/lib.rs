//! Commitflow Core - Core library for Commitflow pull request automation
//!
//! This crate provides the event classification and command-interpretation
//! pipeline: webhook event decoding and routing, command token parsing,
//! and the orchestration that turns a pull request diff into a posted
//! summary comment. Transport lives behind the capability traits in
//! [`capability`].

pub mod bot;
pub mod capability;
pub mod commands;
pub mod config;
pub mod error;
pub mod event;
pub mod relay;
pub mod router;
pub mod secrets;
pub mod summarize;
pub mod telemetry;

pub use bot::Bot;
pub use capability::{CommentSink, CreatedComment, DiffSource, Summarizer};
pub use commands::{CommandSet, ParsedInstruction};
pub use config::Config;
pub use error::{Error, Result};
pub use event::{EventPayload, IssueLocator, PullRequestLocator, WebhookEvent, UNKNOWN_ACTION};
pub use relay::CommandRelay;
pub use router::{DispatchOutcome, EventRouter, Handler};
pub use secrets::Secrets;
pub use summarize::PullRequestSummarizer;
pub use telemetry::TelemetryTap;
