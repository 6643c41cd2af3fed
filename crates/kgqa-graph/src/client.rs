//! Bolt connection management and shared graph client.

use neo4rs::{ConfigBuilder, Graph, Query};
use serde::Deserialize;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Graph connection error: {0}")]
    Connection(String),

    #[error("Graph query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Entity not found: {label} named {name}")]
    NotFound { label: String, name: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Configuration for connecting to the graph database.
///
/// Loaded from the `[graph]` section of `kgqa.toml` or
/// `KGQA__GRAPH__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    /// Graph space (database name). Empty selects the server default.
    #[serde(default = "default_space")]
    pub space: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    7687
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_space() -> String {
    "guardians".to_string()
}

fn default_max_connections() -> u32 {
    4
}

fn default_fetch_size() -> usize {
    256
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: String::new(),
            space: default_space(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

impl GraphConfig {
    /// Bolt URI assembled from host and port.
    pub fn uri(&self) -> String {
        format!("bolt://{}:{}", self.host, self.port)
    }
}

/// Thread-safe graph client with connection pooling.
///
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
    space: String,
}

impl GraphClient {
    /// Connect to the graph database with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let mut builder = ConfigBuilder::default()
            .uri(config.uri())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size);
        if !config.space.is_empty() {
            builder = builder.db(config.space.as_str());
        }
        let neo_config = builder
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri(), space = %config.space, "Connected to graph database");
        Ok(Self {
            graph,
            space: config.space.clone(),
        })
    }

    /// Name of the graph space this client is bound to.
    pub fn space(&self) -> &str {
        &self.space
    }

    /// Execute a write-only query (CREATE, MERGE, SET).
    pub async fn run(&self, query: Query) -> Result<(), GraphError> {
        self.graph.run(query).await?;
        Ok(())
    }

    /// Execute a read query and collect all rows.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        let mut stream = self.graph.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a read query and return the first row, if any.
    pub async fn query_one(&self, query: Query) -> Result<Option<neo4rs::Row>, GraphError> {
        let mut stream = self.graph.execute(query).await?;
        Ok(stream.next().await?)
    }

    /// Begin a transaction.
    pub async fn start_txn(&self) -> Result<neo4rs::Txn, GraphError> {
        Ok(self.graph.start_txn().await?)
    }
}
