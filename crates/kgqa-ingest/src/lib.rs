//! kgqa-ingest: Build the knowledge graph from documents.
//!
//! Loads page text (Wikipedia or local files), splits it into chunks,
//! asks the model for `(subject, relationship, object)` triplets per
//! chunk, and upserts them into the graph store.

pub mod chunker;
pub mod config;
pub mod error;
pub mod extract;
pub mod index;
pub mod text_file;
pub mod wikipedia;

pub use config::IngestConfig;
pub use error::IngestError;
pub use index::{GraphIndexBuilder, IngestStats};
