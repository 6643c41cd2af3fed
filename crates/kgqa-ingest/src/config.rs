//! Configuration for the kgqa-ingest pipeline.

use serde::Deserialize;

use crate::chunker::ChunkConfig;
use crate::error::{IngestError, Result};

/// Top-level ingest configuration.
///
/// Loaded from the `kgqa.toml` `[ingest]` section or
/// `KGQA__INGEST__` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Root of the MediaWiki site to fetch pages from.
    #[serde(default = "default_wikipedia_url")]
    pub wikipedia_url: String,

    /// User-Agent sent to the wiki (MediaWiki rejects anonymous clients).
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP timeout for document fetches, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum chunk length in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// A trailing chunk shorter than this is merged into its predecessor.
    #[serde(default = "default_min_chunk_size")]
    pub min_chunk_size: usize,

    /// Upper bound on triplets requested per chunk.
    #[serde(default = "default_max_triplets")]
    pub max_triplets_per_chunk: usize,

    /// Triplets with a longer subject, relation, or object are dropped.
    #[serde(default = "default_max_field_len")]
    pub max_triplet_field_len: usize,
}

fn default_wikipedia_url() -> String {
    "https://en.wikipedia.org".to_string()
}

fn default_user_agent() -> String {
    concat!("kgqa-ingest/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_chunk_size() -> usize {
    2000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_min_chunk_size() -> usize {
    200
}

fn default_max_triplets() -> usize {
    10
}

fn default_max_field_len() -> usize {
    128
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            wikipedia_url: default_wikipedia_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            min_chunk_size: default_min_chunk_size(),
            max_triplets_per_chunk: default_max_triplets(),
            max_triplet_field_len: default_max_field_len(),
        }
    }
}

impl IngestConfig {
    pub fn chunk_config(&self) -> ChunkConfig {
        ChunkConfig {
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
            min_chunk_size: self.min_chunk_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(IngestError::Config("chunk_size must be positive".to_string()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(IngestError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.max_triplets_per_chunk == 0 {
            return Err(IngestError::Config(
                "max_triplets_per_chunk must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IngestConfig::default();
        assert_eq!(config.wikipedia_url, "https://en.wikipedia.org");
        assert!(config.user_agent.starts_with("kgqa-ingest/"));
        assert_eq!(config.chunk_size, 2000);
        assert_eq!(config.max_triplets_per_chunk, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk() {
        let config = IngestConfig {
            chunk_size: 100,
            chunk_overlap: 100,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(IngestError::Config(_))));
    }

    #[test]
    fn test_chunk_config_mirrors_settings() {
        let config = IngestConfig {
            chunk_size: 500,
            chunk_overlap: 50,
            min_chunk_size: 20,
            ..Default::default()
        };
        let chunk = config.chunk_config();
        assert_eq!(chunk.chunk_size, 500);
        assert_eq!(chunk.chunk_overlap, 50);
        assert_eq!(chunk.min_chunk_size, 20);
    }
}
