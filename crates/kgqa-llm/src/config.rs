//! Model endpoint configuration.

use serde::Deserialize;

use crate::error::{LlmError, Result};

/// Which wire dialect the endpoint speaks.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// `POST {base_url}/chat/completions` with bearer auth.
    #[default]
    OpenAi,
    /// `POST {base_url}/openai/deployments/{deployment}/chat/completions`
    /// with an `api-key` header.
    Azure,
}

/// Model client configuration.
///
/// Loaded from the `[llm]` section of `kgqa.toml` or `KGQA__LLM__*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: Provider,

    /// Falls back to `OPENAI_API_KEY` (or `AZURE_OPENAI_API_KEY`) when empty.
    #[serde(default)]
    pub api_key: String,

    /// Endpoint root. Required for Azure; defaults to the public OpenAI API.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Azure deployment name.
    #[serde(default)]
    pub deployment: Option<String>,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default)]
    pub temperature: f32,

    #[serde(default)]
    pub max_tokens: Option<u32>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_version() -> String {
    "2024-02-01".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            api_key: String::new(),
            base_url: None,
            model: default_model(),
            deployment: None,
            api_version: default_api_version(),
            temperature: 0.0,
            max_tokens: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Fill an empty `api_key` from the provider's conventional variable.
    pub fn with_env_fallback(mut self) -> Self {
        if self.api_key.is_empty() {
            let var = match self.provider {
                Provider::OpenAi => "OPENAI_API_KEY",
                Provider::Azure => "AZURE_OPENAI_API_KEY",
            };
            if let Ok(key) = std::env::var(var) {
                self.api_key = key;
            }
        }
        self
    }

    /// Check that the settings needed by the chosen provider are present.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(LlmError::Config("api_key is not set".to_string()));
        }
        if self.provider == Provider::Azure {
            if self.base_url.as_deref().map_or(true, str::is_empty) {
                return Err(LlmError::Config(
                    "base_url is required for the azure provider".to_string(),
                ));
            }
            if self.deployment.as_deref().map_or(true, str::is_empty) {
                return Err(LlmError::Config(
                    "deployment is required for the azure provider".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Full chat-completions URL for the configured provider.
    pub fn chat_url(&self) -> String {
        let base = self
            .base_url
            .as_deref()
            .unwrap_or(OPENAI_BASE_URL)
            .trim_end_matches('/');
        match self.provider {
            Provider::OpenAi => format!("{base}/chat/completions"),
            Provider::Azure => format!(
                "{base}/openai/deployments/{}/chat/completions?api-version={}",
                self.deployment.as_deref().unwrap_or_default(),
                self.api_version
            ),
        }
    }
}
