//! Command token recognition and instruction extraction
//!
//! Comments addressed to the bot carry one of a fixed set of command
//! tokens (by default `/cf` and `/commitflow`). Everything after the
//! token is the instruction. Matching is case-sensitive, substring-based
//! and not word-bounded.

use serde::{Deserialize, Serialize};

/// The result of parsing a comment for a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInstruction {
    /// The token that matched, if any
    pub command: Option<String>,
    /// Text following the token, trimmed. Empty when no token matched
    /// or when nothing follows the token.
    pub instruction: String,
}

/// An ordered set of recognized command tokens
///
/// The order is a priority list: when several tokens occur in the same
/// comment, the first token in this list that occurs anywhere in the
/// text wins, regardless of where in the text each token appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSet {
    tokens: Vec<String>,
}

impl CommandSet {
    /// Create a command set from tokens in priority order
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// The registered tokens, in priority order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether any registered token occurs in `text` as a substring
    pub fn contains_command(&self, text: &str) -> bool {
        self.tokens.iter().any(|token| text.contains(token.as_str()))
    }

    /// Extract the instruction following the highest-priority token
    /// found in `text`
    ///
    /// Returns the empty string when no token occurs; callers that need
    /// to distinguish "no command" from "command with empty instruction"
    /// should use [`CommandSet::parse`] or check
    /// [`CommandSet::contains_command`] first. When the matched token
    /// occurs more than once, the slice starts after its first
    /// occurrence.
    pub fn instruction(&self, text: &str) -> String {
        self.parse(text).instruction
    }

    /// Parse `text` into the matched token and its instruction
    pub fn parse(&self, text: &str) -> ParsedInstruction {
        for token in &self.tokens {
            if let Some(pos) = text.find(token.as_str()) {
                let instruction = text[pos + token.len()..].trim().to_string();
                return ParsedInstruction {
                    command: Some(token.clone()),
                    instruction,
                };
            }
        }

        ParsedInstruction {
            command: None,
            instruction: String::new(),
        }
    }
}

impl Default for CommandSet {
    fn default() -> Self {
        Self::new(["/cf", "/commitflow"])
    }
}
