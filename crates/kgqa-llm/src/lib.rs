//! KGQA LLM: chat-completion client used for triplet extraction, query
//! translation, and answer synthesis.
//!
//! Callers depend on the [`LanguageModel`] trait; [`OpenAiClient`] talks
//! to OpenAI-compatible and Azure OpenAI endpoints.

pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod model;
pub mod openai;

pub use config::{LlmConfig, Provider};
pub use error::LlmError;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::ScriptedModel;
pub use model::{ChatMessage, ChatRequest, LanguageModel, Role};
pub use openai::OpenAiClient;
