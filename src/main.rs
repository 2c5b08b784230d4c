//! # Item Catalog CLI (`catalog`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `catalog init` | Create the image directory and the configured item storage |
//! | `catalog serve` | Start the HTTP server |
//! | `catalog list` | Print all items |
//! | `catalog get <id>` | Print the first item with the given id |
//! | `catalog search <keyword>` | Print items whose name contains the keyword |
//! | `catalog add --name <n> --category <c>` | Submit an item |
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use item_catalog::{config, init, items, server};

/// Item Catalog: submit, list, and search catalog items with
/// content-addressed images.
#[derive(Parser)]
#[command(name = "catalog", version, about)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the image directory and the item document or table.
    ///
    /// Idempotent: existing items are never discarded.
    Init,

    /// Start the HTTP server on `[server].bind`.
    Serve,

    /// Print every item in insertion order.
    List,

    /// Print the first item with the given id.
    Get {
        /// Item id.
        id: String,
    },

    /// Print items whose name contains the keyword (case-sensitive).
    Search {
        keyword: String,
    },

    /// Submit an item.
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        category: String,

        /// Local image file, stored under its content hash.
        #[arg(long)]
        image: Option<PathBuf>,

        /// Caller-supplied id (not checked for uniqueness).
        #[arg(long)]
        id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init => {
            init::init_storage(&cfg).await?;
            println!("Storage initialized successfully.");
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::List => {
            items::run_list(&cfg).await?;
        }
        Commands::Get { id } => {
            items::run_get(&cfg, &id).await?;
        }
        Commands::Search { keyword } => {
            items::run_search(&cfg, &keyword).await?;
        }
        Commands::Add {
            name,
            category,
            image,
            id,
        } => {
            items::run_add(&cfg, name, category, image.as_deref(), id).await?;
        }
    }

    Ok(())
}
