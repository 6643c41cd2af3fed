//! Read operations: free-form statement execution and entity lookups.

use neo4rs::query;
use serde::{Deserialize, Serialize};

use kgqa_core::result::Row;
use kgqa_core::schema::{ENTITY_TAG, NAME_PROPERTY, RELATIONSHIP_EDGE, RELATIONSHIP_PROPERTY};
use kgqa_core::{QueryResult, Triplet};

use crate::client::{GraphClient, GraphError};

/// Node and edge counts for the bound space.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphStats {
    pub space: String,
    pub entities: i64,
    pub relationships: i64,
}

impl GraphClient {
    // ── Free-form Statements ─────────────────────────────────────

    /// Execute a statement verbatim and collect the rows into a [`QueryResult`].
    pub async fn execute(&self, statement: &str) -> Result<QueryResult, GraphError> {
        tracing::debug!(statement, "Executing statement");
        let rows = self.query_rows(query(statement)).await?;

        let mut converted = Vec::with_capacity(rows.len());
        for row in rows {
            let map: Row = row.to().map_err(|e| {
                GraphError::Serialization(format!("Failed to deserialize row: {e}"))
            })?;
            converted.push(map);
        }

        let result = QueryResult::from_rows(converted);
        tracing::debug!(rows = result.len(), "Statement returned");
        Ok(result)
    }

    // ── Entity Lookups ───────────────────────────────────────────

    /// Check whether an entity with this exact name exists.
    pub async fn find_entity(&self, name: &str) -> Result<Option<String>, GraphError> {
        let cypher = format!(
            "MATCH (n:{ENTITY_TAG} {{{NAME_PROPERTY}: $name}})
             RETURN n.{NAME_PROPERTY} AS name LIMIT 1"
        );

        match self.query_one(query(&cypher).param("name", name.to_string())).await? {
            Some(row) => Ok(Some(row.get::<String>("name").unwrap_or_default())),
            None => Ok(None),
        }
    }

    /// Relationships touching an entity, in either direction, as triplets.
    pub async fn relations_of(&self, name: &str, limit: u32) -> Result<Vec<Triplet>, GraphError> {
        if self.find_entity(name).await?.is_none() {
            return Err(GraphError::NotFound {
                label: ENTITY_TAG.to_string(),
                name: name.to_string(),
            });
        }

        let q = query(&relations_cypher())
            .param("name", name.to_string())
            .param("limit", limit as i64);

        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let subject: String = row.get("subject").unwrap_or_default();
            let relation: String = row.get("relation").unwrap_or_default();
            let object: String = row.get("object").unwrap_or_default();
            match Triplet::new(subject, relation, object) {
                Ok(t) => results.push(t),
                Err(e) => tracing::warn!(error = %e, "Skipping incomplete relationship"),
            }
        }
        Ok(results)
    }

    // ── Counts ───────────────────────────────────────────────────

    pub async fn count_entities(&self) -> Result<i64, GraphError> {
        let cypher = format!("MATCH (n:{ENTITY_TAG}) RETURN count(n) AS cnt");
        match self.query_one(query(&cypher)).await? {
            Some(row) => Ok(row.get::<i64>("cnt").unwrap_or(0)),
            None => Ok(0),
        }
    }

    pub async fn count_relationships(&self) -> Result<i64, GraphError> {
        let cypher = format!(
            "MATCH (:{ENTITY_TAG})-[r:{RELATIONSHIP_EDGE}]->(:{ENTITY_TAG}) RETURN count(r) AS cnt"
        );
        match self.query_one(query(&cypher)).await? {
            Some(row) => Ok(row.get::<i64>("cnt").unwrap_or(0)),
            None => Ok(0),
        }
    }

    pub async fn stats(&self) -> Result<GraphStats, GraphError> {
        Ok(GraphStats {
            space: self.space().to_string(),
            entities: self.count_entities().await?,
            relationships: self.count_relationships().await?,
        })
    }
}

fn relations_cypher() -> String {
    format!(
        "MATCH (s:{ENTITY_TAG})-[r:{RELATIONSHIP_EDGE}]->(o:{ENTITY_TAG})
         WHERE s.{NAME_PROPERTY} = $name OR o.{NAME_PROPERTY} = $name
         RETURN s.{NAME_PROPERTY} AS subject,
                r.{RELATIONSHIP_PROPERTY} AS relation,
                o.{NAME_PROPERTY} AS object
         LIMIT $limit"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relations_cypher_matches_both_directions() {
        let cypher = relations_cypher();
        assert!(cypher.contains("(s:entity)-[r:relationship]->(o:entity)"));
        assert!(cypher.contains("s.name = $name OR o.name = $name"));
        assert!(cypher.contains("r.relationship AS relation"));
        assert!(cypher.contains("LIMIT $limit"));
    }
}
