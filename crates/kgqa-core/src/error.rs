use thiserror::Error;

/// Top-level error type for shared KGQA functionality.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid triplet: {0}")]
    InvalidTriplet(String),
}

pub type Result<T> = std::result::Result<T, Error>;
