//! Response type for a single question.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kgqa_core::QueryResult;

/// Wall-clock time spent in each step, in milliseconds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepTimings {
    pub translate_ms: u64,
    pub execute_ms: u64,
    pub synthesize_ms: u64,
}

impl StepTimings {
    pub fn total_ms(&self) -> u64 {
        self.translate_ms + self.execute_ms + self.synthesize_ms
    }
}

/// Outcome of answering one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query_id: Uuid,
    pub question: String,
    pub generated_query: String,
    pub result: QueryResult,
    pub answer: String,
    pub answered_at: DateTime<Utc>,
    pub timings: StepTimings,
}

impl QueryResponse {
    /// The synthesised natural-language answer.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// The statement the model produced for the question.
    pub fn generated_query(&self) -> &str {
        &self.generated_query
    }

    /// Raw rows returned by the graph.
    pub fn result(&self) -> &QueryResult {
        &self.result
    }
}

impl std::fmt::Display for QueryResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.answer)
    }
}
