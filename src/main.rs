mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use talae_recall::config::RecallConfig;
use talae_recall::memory::types::EntityKind;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "talae-recall",
    version,
    about = "Memory retrieval for character and universe memories"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank a memories file lexically (no embedding calls)
    Rank {
        /// JSON array of memory entries
        #[arg(long)]
        memories: PathBuf,
        /// Query fragment; repeat for several messages
        #[arg(long = "query")]
        queries: Vec<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Embed a memories file and search it semantically
    Search {
        #[arg(long)]
        memories: PathBuf,
        #[arg(long)]
        query: String,
        #[arg(long, default_value = "character")]
        kind: EntityKind,
        #[arg(long, default_value = "cli")]
        entity: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show configuration and check the embedding provider
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = RecallConfig::load()?;

    // Log to stderr so stdout carries only command output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Rank {
            memories,
            queries,
            limit,
        } => {
            let limit = limit.or(Some(config.retrieval.default_limit));
            cli::rank::rank(&memories, &queries, limit)?;
        }
        Command::Search {
            memories,
            query,
            kind,
            entity,
            limit,
        } => {
            cli::search::search(&config, &memories, &query, kind, &entity, limit).await?;
        }
        Command::Doctor => {
            cli::doctor::doctor(&config).await?;
        }
    }

    Ok(())
}
