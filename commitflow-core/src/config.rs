//! Configuration management for Commitflow
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (COMMITFLOW_*)
//! 3. Config file (~/.config/commitflow/config.toml)
//! 4. Default values

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::commands::CommandSet;
use crate::{Error, Result};

/// Command recognition configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// Recognized command tokens, in priority order
    pub tokens: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            tokens: vec!["/cf".to_string(), "/commitflow".to_string()],
        }
    }
}

impl CommandsConfig {
    /// Build the command set from the configured tokens
    pub fn command_set(&self) -> CommandSet {
        CommandSet::new(self.tokens.iter().cloned())
    }
}

/// Summarization service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Model used for diff summaries
    pub model: String,

    /// Base URL of the chat completions API
    pub api_base: String,

    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Completion token cap, if any
    pub max_tokens: Option<u32>,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            request_timeout: Duration::from_secs(30),
            max_tokens: None,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Command recognition configuration
    pub commands: CommandsConfig,

    /// Summarization service configuration
    pub summarizer: SummarizerConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/commitflow/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("commitflow").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - COMMITFLOW_MODEL: Model used for diff summaries
    /// - COMMITFLOW_API_BASE: Base URL of the chat completions API
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("COMMITFLOW_MODEL") {
            self.summarizer.model = model;
        }

        if let Ok(api_base) = std::env::var("COMMITFLOW_API_BASE") {
            self.summarizer.api_base = api_base;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        model: Option<String>,
        api_base: Option<String>,
    ) -> Self {
        if let Some(m) = model {
            self.summarizer.model = m;
        }

        if let Some(base) = api_base {
            self.summarizer.api_base = base;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(model: Option<String>, api_base: Option<String>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(model, api_base))
    }
}
