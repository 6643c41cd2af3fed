//! kgqa-core: Shared types, configuration, and error handling for KGQA.
//!
//! This crate provides the foundational types used across all KGQA components:
//! - Triplets, documents, and text chunks for ingestion
//! - The entity/relationship graph schema and its prompt rendering
//! - Tabular query results returned by the graph store
//! - Layered configuration loading
//! - Common error types

pub mod config;
pub mod error;
pub mod result;
pub mod schema;
pub mod types;

pub use error::Error;
pub use result::QueryResult;
pub use schema::{EdgeTypeDef, GraphSchema, PropertyDef, RelationPattern, TagDef};
pub use types::{Document, TextChunk, Triplet};
