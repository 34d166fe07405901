//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod points;
pub mod search;

use crate::config::Config;
use crate::error::Result;
use crate::server;
use crate::store::{JsonFileStore, RealWorldLocations};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Geocode addresses and keep a list of real-world points
#[derive(Parser)]
#[command(name = "world-points")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Geocode an address and optionally save results
    Search(search::SearchArgs),

    /// List saved points
    List(points::ListArgs),

    /// Remove a saved point by index
    Remove(points::RemoveArgs),

    /// Check whether a coordinate is saved (exact match)
    Has(points::HasArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Start web server (foreground)
    Serve {
        /// Host address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => {
            init_logging("warn");
            search::run(args).await
        }
        Commands::List(args) => {
            init_logging("warn");
            points::list(args)
        }
        Commands::Remove(args) => {
            init_logging("warn");
            points::remove(args)
        }
        Commands::Has(args) => {
            init_logging("warn");
            points::has(args)
        }
        Commands::Config(args) => config::run(args),
        Commands::Serve { host, port } => {
            init_logging("info");
            let config = Config::load()?.with_server_overrides(host, port);
            server::run(config).await
        }
    }
}

/// Install the tracing subscriber; `RUST_LOG` overrides the default level
fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Open the saved points at the configured location
pub fn open_store(config: &Config) -> Result<RealWorldLocations<JsonFileStore>> {
    RealWorldLocations::load(JsonFileStore::new(config.store_path()?))
}
