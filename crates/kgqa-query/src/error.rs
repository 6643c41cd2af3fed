//! Error types for the kgqa-query crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Model error: {0}")]
    Llm(#[from] kgqa_llm::LlmError),

    #[error("Graph error: {0}")]
    Graph(#[from] kgqa_graph::GraphError),

    #[error("Model returned an empty statement")]
    EmptyStatement,

    #[error("Refusing to run a write statement in read-only mode: {statement}")]
    WriteRejected { statement: String },
}

pub type Result<T> = std::result::Result<T, QueryError>;
