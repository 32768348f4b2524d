//! Summarize command - post a diff summary comment on a pull request

use std::sync::Arc;

use clap::Args;
use commitflow_ai::OpenAiClient;
use commitflow_core::event::PullRequestLocator;
use commitflow_core::{CommentSink, Config, DiffSource, PullRequestSummarizer, Summarizer};
use commitflow_github::{parse_github_url, GitHubClient};

/// Summarize a pull request and post the summary as a comment
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Repository (owner/repo format or GitHub URL)
    #[arg(short, long)]
    pub repo: String,

    /// Pull request number
    #[arg(short, long)]
    pub pr: u64,
}

impl SummarizeArgs {
    /// Execute the summarize command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let (owner, repo) = parse_github_url(&self.repo)?;
        let pr = PullRequestLocator {
            owner,
            repo,
            number: self.pr,
        };

        if verbose {
            tracing::info!(
                owner = %pr.owner,
                repo = %pr.repo,
                number = pr.number,
                model = %config.summarizer.model,
                "Summarizing pull request"
            );
        }

        let github = Arc::new(GitHubClient::new()?);
        let openai = Arc::new(OpenAiClient::new(&config.summarizer)?);

        let summarizer = PullRequestSummarizer::new(
            Arc::clone(&github) as Arc<dyn DiffSource>,
            openai as Arc<dyn Summarizer>,
            github as Arc<dyn CommentSink>,
        );

        println!("Summarizing {}/{}#{}...", pr.owner, pr.repo, pr.number);

        let posted = summarizer.summarize_pull_request(&pr).await?;

        println!("Posted summary comment: {}", posted.html_url);

        Ok(())
    }
}
