//! Deliver command - process one webhook delivery

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use commitflow_ai::OpenAiClient;
use commitflow_core::{
    Bot, CommentSink, Config, DiffSource, DispatchOutcome, Summarizer, WebhookEvent,
};
use commitflow_github::GitHubClient;

/// Process one webhook delivery
///
/// Event name and payload path default to the `GITHUB_EVENT_NAME` and
/// `GITHUB_EVENT_PATH` environment variables, so the command can run
/// unmodified inside a workflow runner.
#[derive(Args, Debug)]
pub struct DeliverArgs {
    /// Webhook event name (the X-GitHub-Event header value)
    #[arg(short, long, env = "GITHUB_EVENT_NAME")]
    pub event: String,

    /// Path to the JSON payload file
    #[arg(short, long, env = "GITHUB_EVENT_PATH")]
    pub payload: PathBuf,

    /// Decode and classify the delivery without invoking any handler
    #[arg(long)]
    pub dry_run: bool,
}

impl DeliverArgs {
    /// Execute the deliver command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let raw = std::fs::read_to_string(&self.payload).map_err(|e| {
            anyhow::anyhow!(
                "Failed to read payload file {}: {}",
                self.payload.display(),
                e
            )
        })?;
        let payload: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Payload is not valid JSON: {}", e))?;

        let event = WebhookEvent::decode(&self.event, &payload)?;

        if verbose {
            tracing::info!(
                event = %event.kind,
                action = %event.action,
                "Decoded webhook delivery"
            );
        }

        if self.dry_run {
            println!(
                "[Dry run] Decoded {}.{} - handlers not invoked",
                event.kind, event.action
            );
            return Ok(());
        }

        let github = Arc::new(GitHubClient::new()?);
        let openai = Arc::new(OpenAiClient::new(&config.summarizer)?);

        let bot = Bot::with_commands(
            config.commands.command_set(),
            Arc::clone(&github) as Arc<dyn DiffSource>,
            openai as Arc<dyn Summarizer>,
            github as Arc<dyn CommentSink>,
        );

        match bot.dispatch(&event).await? {
            DispatchOutcome::Handled => {
                println!("Delivery {}.{} handled", event.kind, event.action);
            }
            DispatchOutcome::Unhandled => {
                println!(
                    "Delivery {}.{} acknowledged (no handler registered)",
                    event.kind, event.action
                );
            }
        }

        Ok(())
    }
}
