//! Configuration management for KGQA services.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (KGQA_ prefix, `__` separator, e.g. `KGQA__GRAPH__PASSWORD`)
//! 2. Config file (kgqa.toml, or whatever prefix `--config` names)
//! 3. Defaults
//!
//! Each crate owns the struct for its own section (`[graph]`, `[llm]`,
//! `[ingest]`, `[query]`); this module only performs the layering.

use serde::de::DeserializeOwned;

use crate::error::Result;

/// Environment variable prefix for all KGQA settings.
pub const ENV_PREFIX: &str = "KGQA";

/// Default config file prefix (resolves to `kgqa.toml`, `kgqa.yaml`, ...).
pub const DEFAULT_FILE_PREFIX: &str = "kgqa";

/// Build the layered configuration from an optional file and the environment.
pub fn load_layered(file_prefix: &str, env_prefix: &str) -> Result<config::Config> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix(env_prefix)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    Ok(cfg)
}

/// Load one section (e.g. `"graph"`) using the standard `KGQA` env prefix.
///
/// A missing section yields `T::default()`; a present but malformed one
/// is an error.
pub fn load_section<T>(file_prefix: &str, section: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    load_section_from(file_prefix, ENV_PREFIX, section)
}

/// Like [`load_section`] with an explicit environment prefix.
pub fn load_section_from<T>(file_prefix: &str, env_prefix: &str, section: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let cfg = load_layered(file_prefix, env_prefix)?;
    match cfg.get::<T>(section) {
        Ok(value) => Ok(value),
        Err(config::ConfigError::NotFound(key)) => {
            tracing::debug!(section = %key, "Config section not set, using defaults");
            Ok(T::default())
        }
        Err(e) => Err(e.into()),
    }
}
