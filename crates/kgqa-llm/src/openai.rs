//! OpenAI-compatible chat-completion client (also serves Azure OpenAI).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{LlmConfig, Provider};
use crate::error::{LlmError, Result};
use crate::model::{ChatMessage, ChatRequest, LanguageModel};

/// Chat client for a hosted model endpoint.
pub struct OpenAiClient {
    client: reqwest::Client,
    config: LlmConfig,
    url: String,
}

impl OpenAiClient {
    /// Build a client from validated configuration.
    pub fn new(config: LlmConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let url = config.chat_url();
        Ok(Self {
            client,
            config,
            url,
        })
    }

    fn body<'a>(&'a self, request: &'a ChatRequest) -> ApiRequest<'a> {
        ApiRequest {
            // Azure routes by deployment; the model field is ignored there.
            model: match self.config.provider {
                Provider::OpenAi => Some(self.config.model.as_str()),
                Provider::Azure => None,
            },
            messages: &request.messages,
            temperature: request.temperature.unwrap_or(self.config.temperature),
            max_tokens: request.max_tokens.or(self.config.max_tokens),
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn chat(&self, request: ChatRequest) -> Result<String> {
        let builder = self.client.post(&self.url).json(&self.body(&request));
        let builder = match self.config.provider {
            Provider::OpenAi => builder.bearer_auth(&self.config.api_key),
            Provider::Azure => builder.header("api-key", self.config.api_key.as_str()),
        };

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Api { status, body });
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        if let Some(usage) = &parsed.usage {
            tracing::debug!(
                model = %self.model_name(),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion usage"
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?
            .message
            .content
            .ok_or_else(|| LlmError::InvalidResponse("Choice has no content".to_string()))
    }

    fn model_name(&self) -> &str {
        match self.config.provider {
            Provider::Azure => self.config.deployment.as_deref().unwrap_or(self.config.model.as_str()),
            Provider::OpenAi => &self.config.model,
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
