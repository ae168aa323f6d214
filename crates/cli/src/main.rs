//! Trolley CLI - drive the cart widget from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a product (price is parsed leniently, image is optional)
//! trolley add "Desk Lamp" '$45.00' lamp.png
//!
//! # Adjust quantities
//! trolley inc "Desk Lamp"
//! trolley set "Desk Lamp" 3
//!
//! # Review the checkout panel with a promo code
//! trolley show --promo DISCOUNT10
//!
//! # Place the order
//! trolley checkout --promo DISCOUNT10
//! ```
//!
//! # Environment Variables
//!
//! - `TROLLEY_STORAGE_PATH` - File backing the cart (overridden by `--storage`)
//! - `TROLLEY_STORAGE_KEY` - Key holding the serialized cart
//! - `RUST_LOG` - Log filter (default: `trolley_storefront=info,trolley_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trolley_storefront::config::{ConfigError, StorefrontConfig};

use crate::commands::cart::{self, Session};

mod commands;

const DEFAULT_LOG_FILTER: &str = "trolley_storefront=info,trolley_cli=info";

#[derive(Parser)]
#[command(name = "trolley")]
#[command(author, version, about = "Trolley cart widget")]
struct Cli {
    /// File backing the cart
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add {
        name: String,
        price: String,
        image: Option<String>,
    },
    /// Remove a product from the cart
    Remove { name: String },
    /// Add one unit of a product
    Inc { name: String },
    /// Take one unit of a product away
    Dec { name: String },
    /// Set a product's quantity (0 removes it)
    Set {
        name: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Print the number of units in the cart
    Count,
    /// Print the checkout panel
    Show {
        /// Promo code to apply
        #[arg(long)]
        promo: Option<String>,
    },
    /// Place the order
    Checkout {
        /// Promo code to apply
        #[arg(long)]
        promo: Option<String>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(path) = cli.storage {
        config.storage_path = path;
    }

    let mut session = Session::open(&config);
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Add { name, price, image } => {
            cart::add(&mut session, &mut out, name, price, image)?;
        }
        Commands::Remove { name } => cart::remove(&mut session, &mut out, name)?,
        Commands::Inc { name } => cart::increment(&mut session, &mut out, name)?,
        Commands::Dec { name } => cart::decrement(&mut session, &mut out, name)?,
        Commands::Set { name, quantity } => {
            cart::set_quantity(&mut session, &mut out, name, quantity)?;
        }
        Commands::Count => cart::count(&session, &mut out)?,
        Commands::Show { promo } => cart::show(&mut session, &mut out, promo.as_deref())?,
        Commands::Checkout { promo } => cart::checkout(&mut session, &mut out, promo.as_deref())?,
    }

    out.flush()?;
    Ok(())
}
