//! The graph store seam used by ingestion and querying.

use async_trait::async_trait;

use kgqa_core::{GraphSchema, QueryResult, Triplet};

use crate::client::{GraphClient, GraphError};

/// Operations the workflow needs from a graph database.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Execute a statement verbatim and return its rows.
    async fn execute(&self, statement: &str) -> Result<QueryResult, GraphError>;

    /// Upsert triplets, returning how many were written.
    async fn upsert_triplets(&self, triplets: &[Triplet]) -> Result<usize, GraphError>;

    /// Describe the schema of the bound graph space.
    async fn schema(&self) -> Result<GraphSchema, GraphError>;
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn execute(&self, statement: &str) -> Result<QueryResult, GraphError> {
        GraphClient::execute(self, statement).await
    }

    async fn upsert_triplets(&self, triplets: &[Triplet]) -> Result<usize, GraphError> {
        GraphClient::upsert_triplets(self, triplets).await
    }

    /// Introspected schema, falling back to the entity/relationship schema
    /// when the space holds no data yet. The entity/relationship
    /// description is restored on introspected schemas of that shape.
    async fn schema(&self) -> Result<GraphSchema, GraphError> {
        let schema = self.introspect_schema().await?;
        if schema.is_empty() {
            tracing::warn!(space = %self.space(), "Graph space is empty, using entity/relationship schema");
            return Ok(GraphSchema::entity_relationship(self.space()));
        }
        Ok(schema.with_known_description())
    }
}
