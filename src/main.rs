mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use lifejournal::config::JournalConfig;
use lifejournal::records::Endpoint;

#[derive(Parser)]
#[command(name = "lifejournal", version, about = "Life Journal dashboard and code runner")]
struct Cli {
    /// Config file (default: ~/.lifejournal/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the dashboard over HTTP
    Serve,
    /// Fetch one endpoint and print its cards as HTML
    Fetch {
        /// conversations, facts, todos or lifelogs
        endpoint: Endpoint,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Fetch every record in one unpaginated request
        #[arg(long, conflicts_with = "page")]
        all: bool,
    },
    /// Submit a source file to the execution endpoint
    Run {
        file: PathBuf,
        /// Also print the raw JSON response to stderr
        #[arg(long)]
        response: bool,
    },
    /// Render a saved initial-data JSON payload as a full dashboard page
    Render { payload: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => JournalConfig::load_from(path)?,
        None => JournalConfig::load()?,
    };

    // Log to stderr so stdout stays clean for rendered HTML.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => {
            lifejournal::server::serve(config).await?;
        }
        Command::Fetch {
            endpoint,
            page,
            all,
        } => {
            cli::fetch::fetch(&config, endpoint, page, all).await?;
        }
        Command::Run { file, response } => {
            cli::run::run(&config, &file, response).await?;
        }
        Command::Render { payload } => {
            cli::render::render(&config, &payload)?;
        }
    }

    Ok(())
}
