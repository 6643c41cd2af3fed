//! Error types for the kgqa-ingest crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Page not found: {title}")]
    PageNotFound { title: String },

    #[error("Document source error: {0}")]
    Source(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model error: {0}")]
    Llm(#[from] kgqa_llm::LlmError),

    #[error("Graph error: {0}")]
    Graph(#[from] kgqa_graph::GraphError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
