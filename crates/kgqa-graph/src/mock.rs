//! In-memory [`GraphStore`] for tests.
//!
//! Statements are recorded, never interpreted: `execute` replays the
//! result registered for the exact statement text, or an empty result.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use kgqa_core::{GraphSchema, QueryResult, Triplet};

use crate::client::GraphError;
use crate::store::GraphStore;

pub struct InMemoryGraphStore {
    schema: GraphSchema,
    results: HashMap<String, QueryResult>,
    executed: Mutex<Vec<String>>,
    triplets: Mutex<Vec<Triplet>>,
    failure: Option<String>,
}

impl InMemoryGraphStore {
    pub fn new(schema: GraphSchema) -> Self {
        Self {
            schema,
            results: HashMap::new(),
            executed: Mutex::new(Vec::new()),
            triplets: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// Register the result returned for an exact statement.
    pub fn with_result(mut self, statement: &str, result: QueryResult) -> Self {
        self.results.insert(statement.to_string(), result);
        self
    }

    /// Make every call fail with a connection error.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Statements executed so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Triplets written so far, in order.
    pub fn triplets(&self) -> Vec<Triplet> {
        self.triplets.lock().map(|v| v.clone()).unwrap_or_default()
    }

    fn check(&self) -> Result<(), GraphError> {
        match &self.failure {
            Some(msg) => Err(GraphError::Connection(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn execute(&self, statement: &str) -> Result<QueryResult, GraphError> {
        self.check()?;
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(statement.to_string());
        }
        Ok(self.results.get(statement).cloned().unwrap_or_default())
    }

    async fn upsert_triplets(&self, triplets: &[Triplet]) -> Result<usize, GraphError> {
        self.check()?;
        if let Ok(mut stored) = self.triplets.lock() {
            stored.extend_from_slice(triplets);
        }
        Ok(triplets.len())
    }

    async fn schema(&self) -> Result<GraphSchema, GraphError> {
        self.check()?;
        Ok(self.schema.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_replays_registered_result() {
        let mut cols = BTreeMap::new();
        cols.insert("n".to_string(), vec![serde_json::json!("Groot")]);
        let store = InMemoryGraphStore::new(GraphSchema::entity_relationship("s"))
            .with_result("MATCH (n) RETURN n", QueryResult::from_columnar(cols));

        let hit = store.execute("MATCH (n) RETURN n").await.unwrap();
        let miss = store.execute("MATCH (m) RETURN m").await.unwrap();

        assert_eq!(hit.len(), 1);
        assert!(miss.is_empty());
        assert_eq!(store.executed(), vec!["MATCH (n) RETURN n", "MATCH (m) RETURN m"]);
    }

    #[tokio::test]
    async fn test_failing_store_returns_connection_error() {
        let store = InMemoryGraphStore::new(GraphSchema::default()).failing("refused");
        let err = store.execute("RETURN 1").await.unwrap_err();
        assert!(matches!(err, GraphError::Connection(ref m) if m == "refused"));
        assert!(store.executed().is_empty());
    }

    #[tokio::test]
    async fn test_records_triplets() {
        let store = InMemoryGraphStore::new(GraphSchema::default());
        let t = Triplet::new("Rocket", "friend of", "Groot").unwrap();
        assert_eq!(store.upsert_triplets(&[t.clone()]).await.unwrap(), 1);
        assert_eq!(store.triplets(), vec![t]);
    }
}
