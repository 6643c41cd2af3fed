//! Prompt templates for query translation and answer synthesis.

use kgqa_core::{GraphSchema, QueryResult};

const TEXT_TO_CYPHER_TEMPLATE: &str = "\
Task: Generate a Neo4j Cypher statement to query a graph database.
Instructions:
Use only the node labels, relationship types and properties provided in the schema.
Do not use any other relationship types or properties that are not provided.
Node tags are labels and edge types are relationship types, as in (p:entity)-[r:relationship]->(e:entity).
Read properties directly from the variable, as in p.name or r.relationship.
Compare values with =, never ==.
Example: MATCH (p:entity)-[r:relationship]->(e:entity) WHERE p.name = 'Peter Quill' RETURN r.relationship, e.name
Return only the statement, with no explanation and no Markdown.

Schema:
{schema}

The question is:
{question}";

const SYNTHESIS_TEMPLATE: &str = "\
The original question is given below.
This question has been translated into a graph database query.
Both the graph query and its response are given below.
Given the graph query response, synthesise a response to the original question.

Original question: {question}
Graph query: {statement}
Graph response: {context}
Response: ";

/// Prompt asking the model to translate `question` into one statement.
pub fn text_to_cypher_prompt(schema: &GraphSchema, question: &str) -> String {
    TEXT_TO_CYPHER_TEMPLATE
        .replace("{schema}", &schema.render())
        .replace("{question}", question)
}

/// Prompt asking the model to answer `question` from a raw result.
pub fn synthesis_prompt(question: &str, statement: &str, result: &QueryResult) -> String {
    SYNTHESIS_TEMPLATE
        .replace("{question}", question)
        .replace("{statement}", statement)
        .replace("{context}", &result.render_context())
}
