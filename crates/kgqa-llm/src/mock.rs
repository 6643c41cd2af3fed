//! Deterministic [`LanguageModel`] for tests.
//!
//! Replies are chosen by the first rule whose pattern occurs in the last
//! user message. Every request is recorded for later assertions.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{LlmError, Result};
use crate::model::{ChatRequest, LanguageModel};

#[derive(Default)]
pub struct ScriptedModel {
    rules: Vec<(String, String)>,
    fallback: Option<String>,
    failure: Option<String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `reply` when the prompt contains `pattern`.
    pub fn on(mut self, pattern: &str, reply: &str) -> Self {
        self.rules.push((pattern.to_string(), reply.to_string()));
        self
    }

    /// Reply used when no rule matches.
    pub fn otherwise(mut self, reply: &str) -> Self {
        self.fallback = Some(reply.to_string());
        self
    }

    /// Fail every call with an HTTP error.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Last user message of each request received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.last_user_content().unwrap_or_default().to_string())
            .collect()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn chat(&self, request: ChatRequest) -> Result<String> {
        let prompt = request.last_user_content().unwrap_or_default().to_string();
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        if let Some(msg) = &self.failure {
            return Err(LlmError::Http(msg.clone()));
        }

        self.rules
            .iter()
            .find(|(pattern, _)| prompt.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone())
            .or_else(|| self.fallback.clone())
            .ok_or_else(|| LlmError::InvalidResponse(format!("No scripted reply for: {prompt}")))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_matching_rule_wins() {
        let model = ScriptedModel::new()
            .on("Quill", "first")
            .on("Peter", "second")
            .otherwise("fallback");

        assert_eq!(model.complete("Peter Quill").await.unwrap(), "first");
        assert_eq!(model.complete("Peter Parker").await.unwrap(), "second");
        assert_eq!(model.complete("Gamora").await.unwrap(), "fallback");
        assert_eq!(model.prompts(), vec!["Peter Quill", "Peter Parker", "Gamora"]);
    }

    #[tokio::test]
    async fn test_no_rule_and_no_fallback_is_error() {
        let model = ScriptedModel::new();
        assert!(matches!(
            model.complete("anything").await,
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_failing_model_still_records() {
        let model = ScriptedModel::new().otherwise("x").failing("timeout");
        assert!(matches!(model.complete("q").await, Err(LlmError::Http(_))));
        assert_eq!(model.requests().len(), 1);
    }
}
