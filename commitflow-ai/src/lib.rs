//! Commitflow AI - OpenAI summarization for Commitflow
//!
//! This crate provides the chat-completions call that turns a pull request
//! diff into a prose summary. [`OpenAiClient`] implements the core's
//! `Summarizer` capability.

mod error;
mod openai;
mod prompt;

pub use error::{Error, Result};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use prompt::SUMMARY_SYSTEM_PROMPT;
