//! Graph schema description shared by the graph client and the query engine.
//!
//! The schema is what the model sees when translating a question into a
//! graph query, so `render` is the contract between the two.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Tag (node label) holding every extracted entity.
pub const ENTITY_TAG: &str = "entity";
/// The single string property on an entity node.
pub const NAME_PROPERTY: &str = "name";
/// Edge type joining two entities.
pub const RELATIONSHIP_EDGE: &str = "relationship";
/// The single string property on a relationship edge.
pub const RELATIONSHIP_PROPERTY: &str = "relationship";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: String,
    pub data_type: String,
}

impl PropertyDef {
    pub fn string(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data_type: "string".to_string(),
        }
    }
}

/// A node tag and its properties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagDef {
    pub name: String,
    pub properties: Vec<PropertyDef>,
}

/// An edge type and its properties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdgeTypeDef {
    pub name: String,
    pub properties: Vec<PropertyDef>,
}

/// A `(source)-[edge_type]->(target)` pattern observed or allowed in the graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelationPattern {
    pub source: String,
    pub edge_type: String,
    pub target: String,
}

/// Tags, edge types, and relationship patterns of one graph space.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphSchema {
    pub space: String,
    pub tags: Vec<TagDef>,
    pub edge_types: Vec<EdgeTypeDef>,
    pub relations: Vec<RelationPattern>,
    /// Free-text explanation appended to the rendered schema.
    pub description: Option<String>,
}

impl GraphSchema {
    /// The fixed `entity` / `relationship` schema used for extracted triplets.
    pub fn entity_relationship(space: &str) -> Self {
        Self {
            space: space.to_string(),
            tags: vec![TagDef {
                name: ENTITY_TAG.to_string(),
                properties: vec![PropertyDef::string(NAME_PROPERTY)],
            }],
            edge_types: vec![EdgeTypeDef {
                name: RELATIONSHIP_EDGE.to_string(),
                properties: vec![PropertyDef::string(RELATIONSHIP_PROPERTY)],
            }],
            relations: vec![RelationPattern {
                source: ENTITY_TAG.to_string(),
                edge_type: RELATIONSHIP_EDGE.to_string(),
                target: ENTITY_TAG.to_string(),
            }],
            description: Some(entity_relationship_description()),
        }
    }

    /// Whether the schema carries the `entity` tag and `relationship` edge type.
    pub fn has_entity_relationship(&self) -> bool {
        self.tags.iter().any(|t| t.name == ENTITY_TAG)
            && self.edge_types.iter().any(|e| e.name == RELATIONSHIP_EDGE)
    }

    /// Fill a missing description for entity/relationship graphs.
    ///
    /// Introspection only sees labels and keys, so the prose explaining
    /// them is restored here. An existing description is kept.
    pub fn with_known_description(mut self) -> Self {
        if self.description.is_none() && self.has_entity_relationship() {
            self.description = Some(entity_relationship_description());
        }
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.edge_types.is_empty()
    }

    /// Render the schema as the plain-text block embedded in prompts.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Graph space: {}", self.space);

        let _ = writeln!(out, "Node tags:");
        for tag in &self.tags {
            let _ = writeln!(out, "- {}({})", tag.name, render_props(&tag.properties));
        }

        let _ = writeln!(out, "Edge types:");
        for edge in &self.edge_types {
            let _ = writeln!(out, "- {}({})", edge.name, render_props(&edge.properties));
        }

        let _ = writeln!(out, "Relationships:");
        for rel in &self.relations {
            let _ = writeln!(
                out,
                "- (:{})-[:{}]->(:{})",
                rel.source, rel.edge_type, rel.target
            );
        }

        if let Some(desc) = &self.description {
            let _ = writeln!(out, "Description: {desc}");
        }

        out.trim_end().to_string()
    }
}

fn entity_relationship_description() -> String {
    format!(
        "Every node has tag `{ENTITY_TAG}` with its name in the `{NAME_PROPERTY}` property. \
         Every edge has type `{RELATIONSHIP_EDGE}` and describes the relation in its \
         `{RELATIONSHIP_PROPERTY}` property. Edges point from subject to object."
    )
}

fn render_props(props: &[PropertyDef]) -> String {
    props
        .iter()
        .map(|p| format!("{}: {}", p.name, p.data_type))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_relationship_schema() {
        let schema = GraphSchema::entity_relationship("guardians");
        assert_eq!(schema.space, "guardians");
        assert_eq!(schema.tags.len(), 1);
        assert_eq!(schema.tags[0].name, "entity");
        assert_eq!(schema.edge_types[0].name, "relationship");
        assert_eq!(schema.edge_types[0].properties[0].name, "relationship");
        assert!(!schema.is_empty());
    }

    #[test]
    fn test_render_lists_tags_edges_and_patterns() {
        let rendered = GraphSchema::entity_relationship("guardians").render();
        assert!(rendered.starts_with("Graph space: guardians"));
        assert!(rendered.contains("- entity(name: string)"));
        assert!(rendered.contains("- relationship(relationship: string)"));
        assert!(rendered.contains("- (:entity)-[:relationship]->(:entity)"));
        assert!(rendered.contains("Description: "));
        assert!(!rendered.ends_with('\n'));
    }

    #[test]
    fn test_render_without_description() {
        let mut schema = GraphSchema::entity_relationship("s");
        schema.description = None;
        assert!(!schema.render().contains("Description"));
    }

    #[test]
    fn test_introspected_schema_gets_known_description() {
        // Shape returned by introspection: extra keys, no description.
        let schema = GraphSchema {
            space: "guardians".to_string(),
            tags: vec![TagDef {
                name: "entity".to_string(),
                properties: vec![PropertyDef::string("name"), PropertyDef::string("alias")],
            }],
            edge_types: vec![EdgeTypeDef {
                name: "relationship".to_string(),
                properties: vec![PropertyDef::string("relationship")],
            }],
            relations: Vec::new(),
            description: None,
        };

        let described = schema.with_known_description();
        assert_eq!(
            described.description,
            GraphSchema::entity_relationship("guardians").description
        );
        assert!(described.render().contains("Description: Every node has tag `entity`"));
    }

    #[test]
    fn test_known_description_keeps_existing_and_skips_other_graphs() {
        let custom = GraphSchema::entity_relationship("s").with_description("Films only.");
        assert_eq!(
            custom.with_known_description().description.as_deref(),
            Some("Films only.")
        );

        let other = GraphSchema {
            tags: vec![TagDef {
                name: "Person".to_string(),
                properties: vec![PropertyDef::string("name")],
            }],
            ..Default::default()
        };
        assert!(other.with_known_description().description.is_none());
    }

    #[test]
    fn test_default_schema_is_empty() {
        assert!(GraphSchema::default().is_empty());
    }
}
