//! kgqa-query: Question answering over the KGQA knowledge graph.
//!
//! A question is translated into a graph statement by the model, the
//! statement is executed verbatim against the graph store, and the model
//! synthesises an answer from the raw rows.

pub mod config;
pub mod engine;
pub mod error;
pub mod guard;
pub mod prompts;
pub mod types;

pub use config::QueryConfig;
pub use engine::KnowledgeGraphQueryEngine;
pub use error::QueryError;
pub use types::{QueryResponse, StepTimings};
