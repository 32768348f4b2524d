//! OpenAI chat completions client
//!
//! One endpoint, one call shape: the diff goes out as a chat completion
//! request and the first choice's message content comes back as the
//! summary. There is no retry or backoff; a failed call surfaces to the
//! caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use commitflow_core::capability::Summarizer;
use commitflow_core::config::SummarizerConfig;
use commitflow_core::Secrets;

use crate::prompt::summary_messages;
use crate::{Error, Result};

/// Connection settings for the chat completions API
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Base URL of the API, e.g. `https://api.openai.com/v1`
    pub api_base: String,
    /// Bearer key
    pub api_key: String,
    /// Model used for summaries
    pub model: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Completion token cap, if any
    pub max_tokens: Option<u32>,
}

/// Client for the chat completions API
pub struct OpenAiClient {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a client from summarizer settings
    ///
    /// The API key is loaded from (in priority order):
    /// 1. OPENAI_API_KEY environment variable
    /// 2. ~/.config/commitflow/secrets.toml
    pub fn new(config: &SummarizerConfig) -> Result<Self> {
        let secrets = Secrets::load().map_err(|e| Error::Config(e.to_string()))?;
        let api_key = secrets.openai_api_key().ok_or(Error::MissingApiKey)?;

        Self::with_config(OpenAiConfig {
            api_base: config.api_base.clone(),
            api_key,
            model: config.model.clone(),
            request_timeout: config.request_timeout,
            max_tokens: config.max_tokens,
        })
    }

    /// Create a client from explicit settings
    pub fn with_config(config: OpenAiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }

        url::Url::parse(&config.api_base)
            .map_err(|e| Error::Config(format!("Invalid api_base {}: {}", config.api_base, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let bearer = format!("Bearer {}", config.api_key.trim());
        let mut auth = HeaderValue::from_str(&bearer)
            .map_err(|e| Error::Config(format!("Invalid API key header: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// The URL of the chat completions endpoint
    fn chat_completions_url(&self) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            return base.to_string();
        }

        format!("{}/chat/completions", base)
    }

    /// Summarize a diff with one chat completion call
    pub async fn summarize_diff(&self, diff: &str) -> Result<String> {
        let url = self.chat_completions_url();
        let body = build_summary_body(&self.config.model, diff, self.config.max_tokens);

        debug!(
            model = %self.config.model,
            diff_bytes = diff.len(),
            "Requesting diff summary"
        );

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: raw,
            });
        }

        let summary = parse_summary(&raw)?;
        debug!(bytes = summary.len(), "Received summary");

        Ok(summary)
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_base", &self.config.api_base)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Summarizer for OpenAiClient {
    async fn summarize(&self, diff: &str) -> commitflow_core::Result<String> {
        self.summarize_diff(diff)
            .await
            .map_err(|e| commitflow_core::Error::Summarize(e.to_string()))
    }
}

fn build_summary_body(model: &str, diff: &str, max_tokens: Option<u32>) -> Value {
    let mut body = json!({
        "model": model,
        "messages": summary_messages(diff),
    });

    if let Some(max_tokens) = max_tokens {
        body["max_tokens"] = json!(max_tokens);
    }

    body
}

fn parse_summary(raw: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(raw)?;
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::InvalidResponse("response contained no choices".to_string()))?;
    let content = choice
        .message
        .content
        .ok_or_else(|| Error::InvalidResponse("choice contained no content".to_string()))?;

    Ok(content.trim().to_string())
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_base: &str) -> OpenAiConfig {
        OpenAiConfig {
            api_base: api_base.to_string(),
            api_key: "sk-test".to_string(),
            model: "gpt-4o-mini".to_string(),
            request_timeout: Duration::from_secs(30),
            max_tokens: None,
        }
    }

    #[test]
    fn test_chat_completions_url() {
        let client = OpenAiClient::with_config(config("https://api.openai.com/v1")).unwrap();
        assert_eq!(
            client.chat_completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_chat_completions_url_trailing_slash() {
        let client = OpenAiClient::with_config(config("https://api.openai.com/v1/")).unwrap();
        assert_eq!(
            client.chat_completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_chat_completions_url_full_endpoint() {
        let client =
            OpenAiClient::with_config(config("https://proxy.internal/v1/chat/completions"))
                .unwrap();
        assert_eq!(
            client.chat_completions_url(),
            "https://proxy.internal/v1/chat/completions"
        );
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let mut cfg = config("https://api.openai.com/v1");
        cfg.api_key = "   ".to_string();
        assert!(matches!(
            OpenAiClient::with_config(cfg),
            Err(Error::MissingApiKey)
        ));
    }

    #[test]
    fn test_invalid_api_base_rejected() {
        let result = OpenAiClient::with_config(config("not a url"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_build_summary_body() {
        let body = build_summary_body("gpt-4o-mini", "+line", None);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_build_summary_body_with_max_tokens() {
        let body = build_summary_body("gpt-4o-mini", "+line", Some(256));
        assert_eq!(body["max_tokens"], 256);
    }

    #[test]
    fn test_parse_summary() {
        let raw = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "  Adds logging to the request path.  "
                },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 120, "completion_tokens": 9, "total_tokens": 129 }
        }"#;

        assert_eq!(
            parse_summary(raw).unwrap(),
            "Adds logging to the request path."
        );
    }

    #[test]
    fn test_parse_summary_no_choices() {
        let result = parse_summary(r#"{ "choices": [] }"#);
        assert!(matches!(result, Err(Error::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_summary_null_content() {
        let raw = r#"{ "choices": [{ "message": { "role": "assistant", "content": null } }] }"#;
        assert!(matches!(parse_summary(raw), Err(Error::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_summary_malformed_json() {
        assert!(matches!(parse_summary("not json"), Err(Error::Json(_))));
    }
}
