//! KGQA Graph: Bolt client for the knowledge graph.
//!
//! All graph reads and writes flow through this crate. The ingest and
//! query crates depend only on the [`GraphStore`] trait, which
//! [`GraphClient`] implements against a live database.

pub mod client;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod mutations;
pub mod queries;
pub mod schema;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphError};
#[cfg(any(test, feature = "test-utils"))]
pub use mock::InMemoryGraphStore;
pub use store::GraphStore;
