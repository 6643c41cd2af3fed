//! Configuration for the kgqa-query engine.

use serde::Deserialize;

/// Loaded from the `[query]` section or `KGQA__QUERY__` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Reject generated statements that write to or administer the graph.
    #[serde(default = "default_read_only")]
    pub read_only: bool,

    /// Extra prose appended to the schema in the translation prompt.
    #[serde(default)]
    pub schema_description: Option<String>,

    /// Sampling temperature for translation and synthesis calls. Unset
    /// means `llm.temperature` applies.
    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_read_only() -> bool {
    true
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            read_only: default_read_only(),
            schema_description: None,
            temperature: None,
        }
    }
}
