//! Command relaying from review comments
//!
//! A review comment that carries a command token gets its instruction
//! posted back onto the thread as a new comment, verbatim. Comments
//! without a token are ignored. The instruction is relayed, not
//! executed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::capability::{CommentSink, CreatedComment};
use crate::commands::CommandSet;
use crate::event::{EventPayload, IssueLocator, WebhookEvent};
use crate::router::Handler;
use crate::Result;

/// Filters comments for command tokens and relays their instructions
pub struct CommandRelay {
    commands: CommandSet,
    comments: Arc<dyn CommentSink>,
}

impl CommandRelay {
    /// Create a relay recognizing the given command set
    pub fn new(commands: CommandSet, comments: Arc<dyn CommentSink>) -> Self {
        Self { commands, comments }
    }

    /// Process one comment body
    ///
    /// Returns `None` when the comment carries no command token. An
    /// empty instruction is still posted; rejection of the empty body is
    /// the comment capability's call and propagates as its error.
    pub async fn process_comment(
        &self,
        body: &str,
        issue: &IssueLocator,
    ) -> Result<Option<CreatedComment>> {
        let parsed = self.commands.parse(body);
        let Some(command) = parsed.command else {
            debug!(number = issue.number, "Comment has no command token, ignoring");
            return Ok(None);
        };

        debug!(command = %command, number = issue.number, "Relaying instruction");
        let posted = self.comments.post_comment(issue, &parsed.instruction).await?;

        info!(
            command = %command,
            comment_id = posted.id,
            "Posted instruction comment"
        );

        Ok(Some(posted))
    }
}

#[async_trait]
impl Handler for CommandRelay {
    async fn handle(&self, event: &WebhookEvent) -> Result<()> {
        if let EventPayload::ReviewCommentCreated { body, thread } = &event.payload {
            self.process_comment(body, thread).await?;
        }
        Ok(())
    }
}
