//! Write operations for the knowledge graph.
//!
//! All mutations use MERGE (upsert) semantics so re-ingesting the same
//! text is idempotent. Entities are identified by name; relationships by
//! (subject, relation, object). Nothing here deletes or rewrites existing
//! entities.

use neo4rs::query;

use kgqa_core::schema::{ENTITY_TAG, NAME_PROPERTY, RELATIONSHIP_EDGE, RELATIONSHIP_PROPERTY};
use kgqa_core::Triplet;

use crate::client::{GraphClient, GraphError};

impl GraphClient {
    /// Upsert both entities of a triplet and the relationship between them.
    pub async fn upsert_triplet(&self, triplet: &Triplet) -> Result<(), GraphError> {
        self.run(triplet_query(triplet)).await
    }

    /// Upsert many triplets in a single transaction.
    ///
    /// Returns the number of triplets written.
    pub async fn upsert_triplets(&self, triplets: &[Triplet]) -> Result<usize, GraphError> {
        if triplets.is_empty() {
            return Ok(0);
        }

        let mut txn = self.start_txn().await?;
        for triplet in triplets {
            txn.run(triplet_query(triplet)).await?;
        }
        txn.commit().await?;

        tracing::debug!(count = triplets.len(), "Upserted triplets");
        Ok(triplets.len())
    }
}

fn triplet_query(triplet: &Triplet) -> neo4rs::Query {
    query(&upsert_triplet_cypher())
        .param("subject", triplet.subject.clone())
        .param("relation", triplet.relation.clone())
        .param("object", triplet.object.clone())
}

fn upsert_triplet_cypher() -> String {
    format!(
        "MERGE (s:{ENTITY_TAG} {{{NAME_PROPERTY}: $subject}})
         MERGE (o:{ENTITY_TAG} {{{NAME_PROPERTY}: $object}})
         MERGE (s)-[:{RELATIONSHIP_EDGE} {{{RELATIONSHIP_PROPERTY}: $relation}}]->(o)"
    )
}
