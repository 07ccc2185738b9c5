//! Papex - read-only command line client
//!
//! Queries the registry, paper-token and marketplace contracts and prints
//! normalized records as JSON. Nothing is signed or submitted.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use papex_client::market::listing::DEFAULT_LISTING_LIMIT;
use papex_client::market::registry::DEFAULT_PAPER_LIMIT;
use papex_client::telemetry::init_logging;
use papex_client::{ClientConfig, Papex, Result};

#[derive(Parser)]
#[command(name = "papex", version, about = "Query Papex marketplace contracts")]
struct Cli {
    /// TOML configuration file; defaults target testnet
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Token configuration and live state
    Summary {
        /// Paper-token contract id
        contract: String,
    },
    /// Quote the cost of buying tokens
    QuoteBuy {
        /// Paper-token contract id
        contract: String,
        /// Token amount, as a decimal
        amount: String,
    },
    /// Quote the proceeds of selling tokens
    QuoteSell {
        /// Paper-token contract id
        contract: String,
        /// Token amount, as a decimal
        amount: String,
    },
    /// One registered paper
    Paper {
        /// Registry paper id
        id: u32,
    },
    /// Registered papers
    Papers {
        #[arg(long, default_value_t = DEFAULT_PAPER_LIMIT)]
        limit: u32,
    },
    /// Marketplace listings
    Listings {
        #[arg(long, default_value_t = DEFAULT_LISTING_LIMIT)]
        limit: u32,
        /// Include inactive listings
        #[arg(long)]
        all: bool,
    },
    /// Trades recorded for a paper
    Trades {
        /// Registry paper id
        paper_id: u32,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging("warn,papex_client=info");
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ClientConfig> {
    match path {
        Some(path) => ClientConfig::load(path),
        None => {
            let mut config = ClientConfig::default();
            config.apply_env_overrides()?;
            config.validate()?;
            Ok(config)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let papex = Papex::connect(config)?;

    match cli.command {
        Command::Summary { contract } => print_json(&papex.token_summary(&contract).await?),
        Command::QuoteBuy { contract, amount } => {
            print_json(&papex.quote_buy(&contract, &amount).await?)
        }
        Command::QuoteSell { contract, amount } => {
            print_json(&papex.quote_sell(&contract, &amount).await?)
        }
        Command::Paper { id } => print_json(&papex.get_paper(id).await?),
        Command::Papers { limit } => print_json(&papex.list_papers(limit).await?),
        Command::Listings { limit, all } => print_json(&papex.list_listings(limit, !all).await?),
        Command::Trades { paper_id } => print_json(&papex.load_trades(paper_id).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
