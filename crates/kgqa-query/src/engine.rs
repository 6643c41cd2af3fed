//! Translate, execute, synthesise.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::Instrument;
use uuid::Uuid;

use kgqa_core::{GraphSchema, QueryResult};
use kgqa_graph::GraphStore;
use kgqa_llm::{ChatRequest, LanguageModel};

use crate::config::QueryConfig;
use crate::error::{QueryError, Result};
use crate::guard;
use crate::prompts;
use crate::types::{QueryResponse, StepTimings};

/// Answers natural-language questions against a knowledge graph.
///
/// Holds no state between questions beyond its collaborators and the
/// schema rendered into every translation prompt.
pub struct KnowledgeGraphQueryEngine {
    store: Arc<dyn GraphStore>,
    llm: Arc<dyn LanguageModel>,
    schema: GraphSchema,
    config: QueryConfig,
}

impl KnowledgeGraphQueryEngine {
    pub fn new(
        store: Arc<dyn GraphStore>,
        llm: Arc<dyn LanguageModel>,
        schema: GraphSchema,
        config: QueryConfig,
    ) -> Self {
        let schema = match &config.schema_description {
            Some(description) => schema.with_description(description.clone()),
            None => schema.with_known_description(),
        };
        Self {
            store,
            llm,
            schema,
            config,
        }
    }

    /// Build an engine using the schema the store reports.
    pub async fn from_store(
        store: Arc<dyn GraphStore>,
        llm: Arc<dyn LanguageModel>,
        config: QueryConfig,
    ) -> Result<Self> {
        let schema = store.schema().await?;
        Ok(Self::new(store, llm, schema, config))
    }

    pub fn schema(&self) -> &GraphSchema {
        &self.schema
    }

    /// Ask the model for a statement answering `question`.
    ///
    /// The reply is trimmed and unwrapped from a Markdown code fence;
    /// otherwise it is returned as the model wrote it.
    pub async fn generate_query(&self, question: &str) -> Result<String> {
        let prompt = prompts::text_to_cypher_prompt(&self.schema, question);
        let reply = self.llm.chat(self.request(prompt)).await?;

        let statement = strip_code_fence(&reply);
        if statement.is_empty() {
            return Err(QueryError::EmptyStatement);
        }
        tracing::debug!(statement = %statement, "Generated statement");
        Ok(statement)
    }

    /// Run a statement verbatim. In read-only mode, write and admin
    /// clauses are rejected before anything reaches the graph.
    pub async fn execute(&self, statement: &str) -> Result<QueryResult> {
        if self.config.read_only {
            if let Some(clause) = guard::find_write_clause(statement) {
                tracing::warn!(clause = %clause, statement = %statement, "Rejected write statement");
                return Err(QueryError::WriteRejected {
                    statement: statement.to_string(),
                });
            }
        }
        Ok(self.store.execute(statement).await?)
    }

    /// Ask the model to answer `question` from the raw `result`.
    ///
    /// An empty result is still sent; the model decides how to answer.
    pub async fn synthesize(
        &self,
        question: &str,
        statement: &str,
        result: &QueryResult,
    ) -> Result<String> {
        if result.is_empty() {
            tracing::warn!(statement = %statement, "Query returned no rows");
        }
        let prompt = prompts::synthesis_prompt(question, statement, result);
        Ok(self.llm.chat(self.request(prompt)).await?)
    }

    /// A single-prompt request. Without a configured temperature the
    /// model client's own setting applies.
    fn request(&self, prompt: String) -> ChatRequest {
        let request = ChatRequest::user(prompt);
        match self.config.temperature {
            Some(t) => request.with_temperature(t),
            None => request,
        }
    }

    /// Answer a question end to end.
    pub async fn query(&self, question: &str) -> Result<QueryResponse> {
        let query_id = Uuid::new_v4();
        let span = tracing::info_span!("query", %query_id);

        async move {
            let mut timings = StepTimings::default();

            let step = Instant::now();
            let generated_query = self.generate_query(question).await?;
            timings.translate_ms = step.elapsed().as_millis() as u64;

            let step = Instant::now();
            let result = self.execute(&generated_query).await?;
            timings.execute_ms = step.elapsed().as_millis() as u64;

            let step = Instant::now();
            let answer = self.synthesize(question, &generated_query, &result).await?;
            timings.synthesize_ms = step.elapsed().as_millis() as u64;

            tracing::info!(
                rows = result.len(),
                model = self.llm.model_name(),
                total_ms = timings.total_ms(),
                "Answered question"
            );

            Ok::<_, QueryError>(QueryResponse {
                query_id,
                question: question.to_string(),
                generated_query,
                result,
                answer,
                answered_at: Utc::now(),
                timings,
            })
        }
        .instrument(span)
        .await
    }
}

/// Trim and remove a surrounding ``` fence (with optional language tag).
fn strip_code_fence(reply: &str) -> String {
    let trimmed = reply.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    let Some(body) = body.strip_suffix("```") else {
        return trimmed.to_string();
    };
    // Drop the language tag on the opening line.
    let body = match body.split_once('\n') {
        Some((tag, rest)) if !tag.trim().contains(' ') => rest,
        _ => body,
    };
    body.trim().to_string()
}
