//! Prompt construction for diff summarization

use serde_json::{json, Value};

/// System prompt steering the summarization model
pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a code review assistant. \
Summarize what the following pull request diff changes in a short paragraph \
of plain prose. Focus on behavior and intent rather than listing files. \
Do not repeat the diff.";

/// Build the chat messages for a summary request
///
/// The diff goes through whole as the user message; any size limit is the
/// service's to enforce.
pub fn summary_messages(diff: &str) -> Value {
    json!([
        { "role": "system", "content": SUMMARY_SYSTEM_PROMPT },
        { "role": "user", "content": diff }
    ])
}
