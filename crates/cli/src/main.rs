//! Marketplace CLI - Catalog data file tools.
//!
//! # Usage
//!
//! ```bash
//! # Write the seed catalog (keeps an existing file)
//! mp-cli seed
//!
//! # Overwrite an existing data file with the seed catalog
//! mp-cli seed --data-file /tmp/data.json --force
//!
//! # Print the enriched detail page of product 1
//! mp-cli detail 1
//! ```
//!
//! # Commands
//!
//! - `seed` - Write the seed catalog to the data file
//! - `detail` - Print the enriched detail of a stored product as JSON
//!
//! `--data-file` defaults to `MARKETPLACE_DATA_FILE`, then `data/data.json`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mp-cli")]
#[command(author, version, about = "Marketplace catalog CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the seed catalog to the data file
    Seed {
        /// Data file path
        #[arg(long, env = "MARKETPLACE_DATA_FILE", default_value = marketplace_api::config::DEFAULT_DATA_FILE)]
        data_file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the enriched detail of a stored product
    Detail {
        /// Product id
        id: i64,

        /// Data file path
        #[arg(long, env = "MARKETPLACE_DATA_FILE", default_value = marketplace_api::config::DEFAULT_DATA_FILE)]
        data_file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load .env so MARKETPLACE_DATA_FILE applies
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Seed { data_file, force } => commands::seed::run(&data_file, force).await?,
        Commands::Detail { id, data_file } => {
            let json = commands::detail::render(&data_file, id).await?;
            #[allow(clippy::print_stdout)]
            {
                println!("{json}");
            }
        }
    }
    Ok(())
}
