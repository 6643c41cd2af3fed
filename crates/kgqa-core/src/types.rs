//! Core domain types for the KGQA ingestion pipeline.
//!
//! Documents are split into chunks, and chunks are turned into triplets
//! that become `entity` nodes joined by `relationship` edges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

// ── Triplets ──────────────────────────────────────────────────────

/// A `(subject, relationship, object)` fact extracted from text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Triplet {
    pub subject: String,
    pub relation: String,
    pub object: String,
}

impl Triplet {
    /// Build a triplet, trimming each part. Empty parts are rejected.
    pub fn new(
        subject: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> Result<Self> {
        let subject = subject.into().trim().to_string();
        let relation = relation.into().trim().to_string();
        let object = object.into().trim().to_string();

        if subject.is_empty() || relation.is_empty() || object.is_empty() {
            return Err(Error::InvalidTriplet(format!(
                "({subject}, {relation}, {object})"
            )));
        }

        Ok(Self {
            subject,
            relation,
            object,
        })
    }

    /// Case-insensitive identity used for de-duplication.
    pub fn key(&self) -> (String, String, String) {
        (
            self.subject.to_lowercase(),
            self.relation.to_lowercase(),
            self.object.to_lowercase(),
        )
    }
}

impl std::fmt::Display for Triplet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.relation, self.object)
    }
}

// ── Documents ─────────────────────────────────────────────────────

/// A unit of raw text fetched from a content source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Deterministic id derived from `source`.
    pub id: Uuid,
    /// URL or file path the text came from.
    pub source: String,
    pub title: String,
    pub text: String,
    pub fetched_at: DateTime<Utc>,
}

impl Document {
    pub fn new(source: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            id: Uuid::new_v5(&Uuid::NAMESPACE_URL, source.as_bytes()),
            source,
            title: title.into(),
            text: text.into(),
            fetched_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A slice of a document small enough for a single extraction prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextChunk {
    /// Content hash of document id + text.
    pub id: String,
    pub doc_id: Uuid,
    pub index: usize,
    pub text: String,
    /// Character offsets into the document text.
    pub start_offset: usize,
    pub end_offset: usize,
}
