//! Bot composition root
//!
//! Wires the telemetry tap and the two routed handlers into an event
//! router. The wiring is fixed at construction; dispatching is the only
//! runtime operation.

use std::sync::Arc;

use crate::capability::{CommentSink, DiffSource, Summarizer};
use crate::commands::CommandSet;
use crate::event::WebhookEvent;
use crate::relay::CommandRelay;
use crate::router::{DispatchOutcome, EventRouter};
use crate::summarize::PullRequestSummarizer;
use crate::telemetry::TelemetryTap;
use crate::Result;

/// The assembled webhook bot
pub struct Bot {
    router: EventRouter,
}

impl Bot {
    /// Assemble the bot with the default command set
    pub fn new(
        diffs: Arc<dyn DiffSource>,
        summarizer: Arc<dyn Summarizer>,
        comments: Arc<dyn CommentSink>,
    ) -> Self {
        Self::with_commands(CommandSet::default(), diffs, summarizer, comments)
    }

    /// Assemble the bot with a custom command set
    pub fn with_commands(
        commands: CommandSet,
        diffs: Arc<dyn DiffSource>,
        summarizer: Arc<dyn Summarizer>,
        comments: Arc<dyn CommentSink>,
    ) -> Self {
        let mut router = EventRouter::new();

        router.on_any(Arc::new(TelemetryTap::new()));
        router.on(
            "pull_request",
            "opened",
            Arc::new(PullRequestSummarizer::new(
                diffs,
                summarizer,
                Arc::clone(&comments),
            )),
        );
        router.on(
            "pull_request_review_comment",
            "created",
            Arc::new(CommandRelay::new(commands, comments)),
        );

        Self { router }
    }

    /// Dispatch one decoded delivery
    pub async fn dispatch(&self, event: &WebhookEvent) -> Result<DispatchOutcome> {
        self.router.dispatch(event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CreatedComment;
    use crate::event::{EventPayload, IssueLocator, PullRequestLocator};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticDiff;

    #[async_trait]
    impl DiffSource for StaticDiff {
        async fn fetch_diff(&self, _pr: &PullRequestLocator) -> Result<String> {
            Ok("+fn main() {}".to_string())
        }
    }

    struct FailingDiff;

    #[async_trait]
    impl DiffSource for FailingDiff {
        async fn fetch_diff(&self, pr: &PullRequestLocator) -> Result<String> {
            Err(crate::Error::DiffFetch(format!("no diff for #{}", pr.number)))
        }
    }

    struct StaticSummary;

    #[async_trait]
    impl Summarizer for StaticSummary {
        async fn summarize(&self, _diff: &str) -> Result<String> {
            Ok("Adds a main function.".to_string())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        posts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CommentSink for RecordingSink {
        async fn post_comment(&self, _issue: &IssueLocator, body: &str) -> Result<CreatedComment> {
            let mut posts = self.posts.lock().unwrap();
            posts.push(body.to_string());
            Ok(CreatedComment {
                id: posts.len() as u64,
                html_url: "https://github.com/octocat/widgets/pull/1#issuecomment-1".to_string(),
            })
        }
    }

    fn bot(sink: &Arc<RecordingSink>) -> Bot {
        Bot::new(
            Arc::new(StaticDiff),
            Arc::new(StaticSummary),
            Arc::clone(sink) as Arc<dyn CommentSink>,
        )
    }

    #[tokio::test]
    async fn test_pull_request_opened_posts_summary() {
        let sink = Arc::new(RecordingSink::default());
        let bot = bot(&sink);

        let event = WebhookEvent {
            kind: "pull_request".to_string(),
            action: "opened".to_string(),
            payload: EventPayload::PullRequestOpened {
                pr: PullRequestLocator {
                    owner: "octocat".to_string(),
                    repo: "widgets".to_string(),
                    number: 1,
                },
            },
        };
        let outcome = bot.dispatch(&event).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Handled);
        let posts = sink.posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].starts_with("Diff:\n```"));
        assert!(posts[0].contains("Summary:\nAdds a main function."));
    }

    #[tokio::test]
    async fn test_review_comment_with_command_is_relayed() {
        let sink = Arc::new(RecordingSink::default());
        let bot = bot(&sink);

        let event = WebhookEvent {
            kind: "pull_request_review_comment".to_string(),
            action: "created".to_string(),
            payload: EventPayload::ReviewCommentCreated {
                body: "/commitflow split this function".to_string(),
                thread: IssueLocator {
                    owner: "octocat".to_string(),
                    repo: "widgets".to_string(),
                    number: 1,
                },
            },
        };
        let outcome = bot.dispatch(&event).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Handled);
        assert_eq!(
            *sink.posts.lock().unwrap(),
            vec!["split this function".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_diff_fetch_propagates_and_posts_nothing() {
        let sink = Arc::new(RecordingSink::default());
        let bot = Bot::new(
            Arc::new(FailingDiff),
            Arc::new(StaticSummary),
            Arc::clone(&sink) as Arc<dyn CommentSink>,
        );

        let event = WebhookEvent {
            kind: "pull_request".to_string(),
            action: "opened".to_string(),
            payload: EventPayload::PullRequestOpened {
                pr: PullRequestLocator {
                    owner: "octocat".to_string(),
                    repo: "widgets".to_string(),
                    number: 1,
                },
            },
        };

        assert!(bot.dispatch(&event).await.is_err());
        assert!(sink.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_review_comment_without_command_posts_nothing() {
        let sink = Arc::new(RecordingSink::default());
        let bot = bot(&sink);

        let event = WebhookEvent {
            kind: "pull_request_review_comment".to_string(),
            action: "created".to_string(),
            payload: EventPayload::ReviewCommentCreated {
                body: "no command here".to_string(),
                thread: IssueLocator {
                    owner: "octocat".to_string(),
                    repo: "widgets".to_string(),
                    number: 1,
                },
            },
        };
        let outcome = bot.dispatch(&event).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Handled);
        assert!(sink.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_issue_events_are_acknowledged_without_handlers() {
        let sink = Arc::new(RecordingSink::default());
        let bot = bot(&sink);

        let opened = WebhookEvent {
            kind: "issues".to_string(),
            action: "opened".to_string(),
            payload: EventPayload::IssueOpened {
                issue: IssueLocator {
                    owner: "octocat".to_string(),
                    repo: "widgets".to_string(),
                    number: 3,
                },
            },
        };
        let commented = WebhookEvent {
            kind: "issue_comment".to_string(),
            action: "created".to_string(),
            payload: EventPayload::IssueCommentCreated {
                body: "/cf not on this thread".to_string(),
                issue: IssueLocator {
                    owner: "octocat".to_string(),
                    repo: "widgets".to_string(),
                    number: 3,
                },
            },
        };

        assert_eq!(bot.dispatch(&opened).await.unwrap(), DispatchOutcome::Unhandled);
        assert_eq!(
            bot.dispatch(&commented).await.unwrap(),
            DispatchOutcome::Unhandled
        );
        assert!(sink.posts.lock().unwrap().is_empty());
    }
}
