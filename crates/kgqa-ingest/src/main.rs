//! CLI entry point for kgqa-ingest.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use kgqa_core::config::{load_section, DEFAULT_FILE_PREFIX};
use kgqa_core::{Document, GraphSchema};
use kgqa_graph::{GraphClient, GraphConfig};
use kgqa_llm::{LlmConfig, OpenAiClient};

use kgqa_ingest::text_file::load_text_file;
use kgqa_ingest::wikipedia::WikipediaLoader;
use kgqa_ingest::{GraphIndexBuilder, IngestConfig};

#[derive(Parser)]
#[command(name = "kgqa-ingest")]
#[command(about = "Load documents into the KGQA knowledge graph")]
struct Cli {
    /// Config file prefix (default: kgqa).
    #[arg(short, long, default_value = DEFAULT_FILE_PREFIX)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the entity name constraint and relationship index.
    InitSchema,
    /// Fetch encyclopedia pages and index them.
    Wikipedia {
        /// Page title; repeat for several pages.
        #[arg(short, long, required = true)]
        page: Vec<String>,
    },
    /// Index a local UTF-8 text file.
    File {
        #[arg(short, long)]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();
    let graph_config: GraphConfig = load_section(&cli.config, "graph")?;
    let ingest_config: IngestConfig = load_section(&cli.config, "ingest")?;
    ingest_config.validate()?;

    let graph = GraphClient::connect(&graph_config).await?;

    let docs = match cli.command {
        Command::InitSchema => {
            let schema = GraphSchema::entity_relationship(graph.space());
            graph.ensure_schema(&schema).await?;
            tracing::info!(space = %graph.space(), "Schema ready");
            return Ok(());
        }
        Command::Wikipedia { page } => {
            let loader = WikipediaLoader::new(&ingest_config)?;
            loader.load_all(&page).await?
        }
        Command::File { path } => vec![load_text_file(&path).await?],
    };

    run_ingest(&cli.config, ingest_config, graph, &docs).await
}

async fn run_ingest(
    file_prefix: &str,
    ingest_config: IngestConfig,
    graph: GraphClient,
    docs: &[Document],
) -> anyhow::Result<()> {
    let llm_config = load_section::<LlmConfig>(file_prefix, "llm")?.with_env_fallback();
    let llm = OpenAiClient::new(llm_config)?;

    let builder = GraphIndexBuilder::new(Arc::new(llm), Arc::new(graph), ingest_config);
    let stats = builder.insert_documents(docs).await?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
