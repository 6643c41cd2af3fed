//! Build the knowledge graph from documents.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use kgqa_core::Document;
use kgqa_graph::GraphStore;
use kgqa_llm::LanguageModel;

use crate::chunker::chunk_document;
use crate::config::IngestConfig;
use crate::error::Result;
use crate::extract::TripletExtractor;

/// Counters for one ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestStats {
    pub documents: usize,
    pub chunks: usize,
    pub triplets_extracted: usize,
    pub triplets_written: usize,
    pub chunks_failed: usize,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl IngestStats {
    fn start() -> Self {
        Self {
            documents: 0,
            chunks: 0,
            triplets_extracted: 0,
            triplets_written: 0,
            chunks_failed: 0,
            started_at: Utc::now(),
            duration_ms: 0,
        }
    }
}

/// Chunks documents, extracts triplets, and writes them to the graph.
pub struct GraphIndexBuilder {
    extractor: TripletExtractor,
    store: Arc<dyn GraphStore>,
    config: IngestConfig,
}

impl GraphIndexBuilder {
    pub fn new(llm: Arc<dyn LanguageModel>, store: Arc<dyn GraphStore>, config: IngestConfig) -> Self {
        let extractor = TripletExtractor::new(
            llm,
            config.max_triplets_per_chunk,
            config.max_triplet_field_len,
        );
        Self {
            extractor,
            store,
            config,
        }
    }

    /// Ingest documents in order.
    ///
    /// A chunk whose extraction fails is logged and counted in
    /// `chunks_failed`; a failed graph write aborts the run.
    pub async fn insert_documents(&self, docs: &[Document]) -> Result<IngestStats> {
        let timer = Instant::now();
        let mut stats = IngestStats::start();
        let chunk_config = self.config.chunk_config();

        for doc in docs {
            if doc.is_empty() {
                tracing::warn!(title = %doc.title, "Skipping empty document");
                continue;
            }
            stats.documents += 1;

            let chunks = chunk_document(doc, &chunk_config);
            tracing::info!(title = %doc.title, chunks = chunks.len(), "Indexing document");

            for chunk in &chunks {
                stats.chunks += 1;
                let triplets = match self.extractor.extract(chunk).await {
                    Ok(t) => t,
                    Err(e) => {
                        tracing::warn!(
                            title = %doc.title,
                            chunk = chunk.index,
                            error = %e,
                            "Triplet extraction failed"
                        );
                        stats.chunks_failed += 1;
                        continue;
                    }
                };

                stats.triplets_extracted += triplets.len();
                if triplets.is_empty() {
                    continue;
                }
                stats.triplets_written += self.store.upsert_triplets(&triplets).await?;
            }
        }

        stats.duration_ms = timer.elapsed().as_millis() as u64;
        tracing::info!(
            documents = stats.documents,
            chunks = stats.chunks,
            triplets = stats.triplets_written,
            failed = stats.chunks_failed,
            duration_ms = stats.duration_ms,
            "Ingestion complete"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kgqa_core::{GraphSchema, Triplet};
    use kgqa_graph::{GraphError, InMemoryGraphStore};
    use kgqa_llm::ScriptedModel;

    use crate::error::IngestError;

    fn builder(llm: Arc<ScriptedModel>, store: Arc<InMemoryGraphStore>) -> GraphIndexBuilder {
        GraphIndexBuilder::new(llm, store, IngestConfig::default())
    }

    fn store() -> Arc<InMemoryGraphStore> {
        Arc::new(InMemoryGraphStore::new(GraphSchema::entity_relationship("test")))
    }

    #[tokio::test]
    async fn test_inserts_extracted_triplets() {
        let llm = Arc::new(
            ScriptedModel::new()
                .on("Peter Quill", "(Peter Quill, leader of, Guardians of the Galaxy)")
                .on("Gamora", "(Gamora, daughter of, Thanos)\n(Gamora, member of, Guardians of the Galaxy)"),
        );
        let store = store();
        let docs = vec![
            Document::new("test://quill", "Quill", "Peter Quill leads the Guardians."),
            Document::new("test://gamora", "Gamora", "Gamora is the daughter of Thanos."),
        ];

        let stats = builder(llm, store.clone()).insert_documents(&docs).await.unwrap();

        assert_eq!(stats.documents, 2);
        assert_eq!(stats.chunks, 2);
        assert_eq!(stats.triplets_extracted, 3);
        assert_eq!(stats.triplets_written, 3);
        assert_eq!(stats.chunks_failed, 0);
        assert_eq!(
            store.triplets()[0],
            Triplet::new("Peter Quill", "leader of", "Guardians of the Galaxy").unwrap()
        );
    }

    #[tokio::test]
    async fn test_extraction_failure_is_counted_not_fatal() {
        let llm = Arc::new(ScriptedModel::new().on("Groot", "(Groot, is, tree)"));
        let store = store();
        let docs = vec![
            Document::new("test://drax", "Drax", "Drax seeks revenge."),
            Document::new("test://groot", "Groot", "Groot is a tree."),
        ];

        let stats = builder(llm, store.clone()).insert_documents(&docs).await.unwrap();

        assert_eq!(stats.chunks, 2);
        assert_eq!(stats.chunks_failed, 1);
        assert_eq!(stats.triplets_written, 1);
        assert_eq!(store.triplets().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_documents_are_skipped() {
        let llm = Arc::new(ScriptedModel::new().otherwise("(a, b, c)"));
        let store = store();
        let docs = vec![Document::new("test://empty", "Empty", "  ")];

        let stats = builder(llm.clone(), store).insert_documents(&docs).await.unwrap();

        assert_eq!(stats.documents, 0);
        assert_eq!(stats.chunks, 0);
        assert!(llm.requests().is_empty());
    }

    #[tokio::test]
    async fn test_graph_failure_is_fatal() {
        let llm = Arc::new(ScriptedModel::new().otherwise("(Rocket, friend of, Groot)"));
        let store = Arc::new(
            InMemoryGraphStore::new(GraphSchema::entity_relationship("test")).failing("refused"),
        );
        let docs = vec![Document::new("test://rocket", "Rocket", "Rocket and Groot.")];

        let err = builder(llm, store).insert_documents(&docs).await.unwrap_err();
        assert!(matches!(err, IngestError::Graph(GraphError::Connection(_))));
    }

    #[tokio::test]
    async fn test_reply_without_triplets_writes_nothing() {
        let llm = Arc::new(ScriptedModel::new().otherwise("I could not find any."));
        let store = store();
        let docs = vec![Document::new("test://x", "X", "Nothing to see.")];

        let stats = builder(llm, store.clone()).insert_documents(&docs).await.unwrap();
        assert_eq!(stats.triplets_extracted, 0);
        assert!(store.triplets().is_empty());
    }
}
