//! CLI entry point for kgqa-query.
//!
//! Answers go to stdout; logs go to stderr.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use kgqa_core::config::{load_section, DEFAULT_FILE_PREFIX};
use kgqa_graph::{GraphClient, GraphConfig, GraphStore};
use kgqa_llm::{LlmConfig, OpenAiClient};

use kgqa_query::{KnowledgeGraphQueryEngine, QueryConfig};

/// Used when `RUST_LOG` is unset. Per-question progress is logged at
/// `info` and stays hidden unless asked for.
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "kgqa-query")]
#[command(about = "Ask questions of the KGQA knowledge graph")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: kgqa).
    #[arg(short, long, default_value = DEFAULT_FILE_PREFIX, global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a natural-language question.
    Ask {
        question: String,
        /// Also print the generated statement.
        #[arg(long)]
        show_query: bool,
        /// Print the full response as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run a hand-written statement and print the rows as JSON.
    Cypher { statement: String },
    /// Print the schema used in translation prompts.
    Schema,
    /// Print entity and relationship counts.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let graph_config: GraphConfig = load_section(&cli.config, "graph")?;
    let graph = GraphClient::connect(&graph_config).await?;

    match cli.command {
        Command::Ask {
            ref question,
            show_query,
            json,
        } => {
            let query_config: QueryConfig = load_section(&cli.config, "query")?;
            let llm_config = load_section::<LlmConfig>(&cli.config, "llm")?.with_env_fallback();
            let llm = OpenAiClient::new(llm_config)?;

            let engine =
                KnowledgeGraphQueryEngine::from_store(Arc::new(graph), Arc::new(llm), query_config)
                    .await?;
            let response = engine.query(question).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                if show_query {
                    println!("{}\n", response.generated_query());
                }
                println!("{}", response.answer());
            }
        }
        Command::Cypher { ref statement } => {
            let result = graph.execute(statement).await?;
            println!("{}", serde_json::to_string_pretty(result.rows())?);
        }
        Command::Schema => {
            let schema = GraphStore::schema(&graph).await?;
            println!("{}", schema.render());
        }
        Command::Stats => {
            let stats = graph.stats().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
