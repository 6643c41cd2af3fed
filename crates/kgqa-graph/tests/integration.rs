//! Integration tests for kgqa-graph against a live Bolt graph database.
//!
//! Run with: cargo test --package kgqa-graph --test integration -- --ignored
//!
//! Each test writes entities under a unique name prefix and removes them
//! afterwards. Skipped automatically if the database is not available.

use kgqa_core::{GraphSchema, Triplet};
use kgqa_graph::{GraphClient, GraphConfig, GraphError, GraphStore};

async fn connect_or_skip() -> Option<GraphClient> {
    let config = GraphConfig {
        password: std::env::var("KGQA__GRAPH__PASSWORD").unwrap_or_default(),
        space: String::new(),
        ..Default::default()
    };
    match GraphClient::connect(&config).await {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("Skipping integration test (graph database not available): {e}");
            None
        }
    }
}

fn unique_prefix() -> String {
    format!("kgqa-test-{}", std::process::id())
}

async fn cleanup(client: &GraphClient, prefix: &str) {
    let q = neo4rs::query("MATCH (n:entity) WHERE n.name STARTS WITH $prefix DETACH DELETE n")
        .param("prefix", prefix.to_string());
    let _ = client.run(q).await;
}

fn triplet(prefix: &str, s: &str, r: &str, o: &str) -> Triplet {
    Triplet::new(format!("{prefix} {s}"), r, format!("{prefix} {o}")).unwrap()
}

#[tokio::test]
#[ignore = "requires live graph database"]
async fn test_upsert_triplet_is_idempotent() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let prefix = unique_prefix();
    cleanup(&client, &prefix).await;

    let t = triplet(&prefix, "Peter Quill", "member of", "Guardians");
    client.upsert_triplet(&t).await.unwrap();
    client.upsert_triplet(&t).await.unwrap();

    let relations = client
        .relations_of(&format!("{prefix} Peter Quill"), 10)
        .await
        .unwrap();
    assert_eq!(relations, vec![t]);

    cleanup(&client, &prefix).await;
}

#[tokio::test]
#[ignore = "requires live graph database"]
async fn test_execute_returns_columns() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let prefix = unique_prefix();
    cleanup(&client, &prefix).await;

    client
        .upsert_triplets(&[
            triplet(&prefix, "Peter Quill", "has", "grandfather"),
            triplet(&prefix, "Peter Quill", "loves", "Gamora"),
        ])
        .await
        .unwrap();

    let statement = format!(
        "MATCH (p:entity)-[:relationship]->(e:entity) WHERE p.name = '{prefix} Peter Quill' \
         RETURN e.name AS name ORDER BY name"
    );
    let result = GraphStore::execute(&client, &statement).await.unwrap();
    assert_eq!(result.columns(), &["name".to_string()]);
    assert_eq!(result.len(), 2);

    cleanup(&client, &prefix).await;
}

#[tokio::test]
#[ignore = "requires live graph database"]
async fn test_execute_keeps_return_order() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let result = client
        .execute("RETURN 'Gamora' AS zeta, 'Peter Quill' AS alpha")
        .await
        .unwrap();
    assert_eq!(result.columns(), &["zeta".to_string(), "alpha".to_string()]);
}

#[tokio::test]
#[ignore = "requires live graph database"]
async fn test_malformed_statement_is_query_error() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let err = client.execute("MATCH (n RETURN n").await.unwrap_err();
    assert!(matches!(err, GraphError::Query(_)));
}

#[tokio::test]
#[ignore = "requires live graph database"]
async fn test_relations_of_unknown_entity() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let err = client
        .relations_of(&format!("{} nobody", unique_prefix()), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, GraphError::NotFound { .. }));
}

#[tokio::test]
#[ignore = "requires live graph database"]
async fn test_ensure_schema_is_repeatable() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let schema = GraphSchema::entity_relationship("");
    client.ensure_schema(&schema).await.unwrap();
    client.ensure_schema(&schema).await.unwrap();
}
