//! Schema setup and introspection.
//!
//! `ensure_schema` is the administrative step that normally happens once,
//! out-of-band, before any data is written. Every statement is idempotent.

use neo4rs::query;

use kgqa_core::schema::{
    EdgeTypeDef, GraphSchema, PropertyDef, RelationPattern, TagDef, NAME_PROPERTY,
};

use crate::client::{GraphClient, GraphError};

/// Upper bound on distinct relationship patterns sampled during introspection.
const MAX_PATTERNS: i64 = 50;

impl GraphClient {
    /// Create the uniqueness constraints and indexes the schema relies on.
    pub async fn ensure_schema(&self, schema: &GraphSchema) -> Result<(), GraphError> {
        for statement in schema_statements(schema) {
            tracing::debug!(%statement, "Applying schema statement");
            self.run(query(&statement)).await?;
        }
        tracing::info!(
            space = %schema.space,
            tags = schema.tags.len(),
            edge_types = schema.edge_types.len(),
            "Schema ensured"
        );
        Ok(())
    }

    /// Read tags, edge types, and observed relationship patterns from the database.
    pub async fn introspect_schema(&self) -> Result<GraphSchema, GraphError> {
        let labels = self
            .collect_strings("CALL db.labels() YIELD label RETURN label AS value")
            .await?;
        let rel_types = self
            .collect_strings(
                "CALL db.relationshipTypes() YIELD relationshipType RETURN relationshipType AS value",
            )
            .await?;

        let mut tags = Vec::with_capacity(labels.len());
        for label in labels {
            let keys = self
                .collect_strings(&format!(
                    "MATCH (n:{}) WITH n LIMIT 100 UNWIND keys(n) AS k RETURN DISTINCT k AS value",
                    quote_ident(&label)
                ))
                .await?;
            tags.push(TagDef {
                name: label,
                properties: keys.iter().map(|k| PropertyDef::string(k)).collect(),
            });
        }

        let mut edge_types = Vec::with_capacity(rel_types.len());
        for rel in rel_types {
            let keys = self
                .collect_strings(&format!(
                    "MATCH ()-[r:{}]->() WITH r LIMIT 100 UNWIND keys(r) AS k RETURN DISTINCT k AS value",
                    quote_ident(&rel)
                ))
                .await?;
            edge_types.push(EdgeTypeDef {
                name: rel,
                properties: keys.iter().map(|k| PropertyDef::string(k)).collect(),
            });
        }

        let q = query(
            "MATCH (a)-[r]->(b)
             WITH labels(a)[0] AS source, type(r) AS edge_type, labels(b)[0] AS target
             RETURN DISTINCT source, edge_type, target
             LIMIT $limit",
        )
        .param("limit", MAX_PATTERNS);

        let rows = self.query_rows(q).await?;
        let mut relations = Vec::with_capacity(rows.len());
        for row in rows {
            relations.push(RelationPattern {
                source: row.get("source").unwrap_or_default(),
                edge_type: row.get("edge_type").unwrap_or_default(),
                target: row.get("target").unwrap_or_default(),
            });
        }

        Ok(GraphSchema {
            space: self.space().to_string(),
            tags,
            edge_types,
            relations,
            description: None,
        })
    }

    async fn collect_strings(&self, cypher: &str) -> Result<Vec<String>, GraphError> {
        let rows = self.query_rows(query(cypher)).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.get::<String>("value").ok())
            .collect())
    }
}

/// Idempotent DDL for a schema: a uniqueness constraint on every tag's
/// `name` property and an index on every edge property.
pub fn schema_statements(schema: &GraphSchema) -> Vec<String> {
    let mut statements = Vec::new();

    for tag in &schema.tags {
        for prop in &tag.properties {
            if prop.name == NAME_PROPERTY {
                statements.push(format!(
                    "CREATE CONSTRAINT {}_unique IF NOT EXISTS FOR (n:{}) REQUIRE n.{} IS UNIQUE",
                    ddl_name(&tag.name, &prop.name),
                    quote_ident(&tag.name),
                    quote_ident(&prop.name)
                ));
            } else {
                statements.push(format!(
                    "CREATE INDEX {} IF NOT EXISTS FOR (n:{}) ON (n.{})",
                    ddl_name(&tag.name, &prop.name),
                    quote_ident(&tag.name),
                    quote_ident(&prop.name)
                ));
            }
        }
    }

    for edge in &schema.edge_types {
        for prop in &edge.properties {
            statements.push(format!(
                "CREATE INDEX {} IF NOT EXISTS FOR ()-[r:{}]-() ON (r.{})",
                ddl_name(&edge.name, &prop.name),
                quote_ident(&edge.name),
                quote_ident(&prop.name)
            ));
        }
    }

    statements
}

/// Constraint/index name for a (label, property) pair.
fn ddl_name(label: &str, property: &str) -> String {
    format!("{label}_{property}")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Backtick-quote an identifier unless it is a plain word.
fn quote_ident(ident: &str) -> String {
    let plain = !ident.is_empty()
        && ident
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !ident.starts_with(|c: char| c.is_ascii_digit());
    if plain {
        ident.to_string()
    } else {
        format!("`{}`", ident.replace('`', "``"))
    }
}
