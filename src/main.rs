//! Directional trade execution backend.
//!
//! Takes a trade intent (symbol, direction, entry, stop-loss, three
//! take-profit targets, percentage of portfolio to risk) and turns it into
//! a sized entry order plus reduce-only protective orders on the venue.

mod api;
mod models;
mod trading;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::api::{ExchangeGateway, PaperGateway, VenueClient};
use crate::models::{Direction, TradeRequest};
use crate::trading::{ExecutionConfig, TradeExecutor};

/// Trade execution CLI.
#[derive(Parser)]
#[command(name = "perpexec")]
#[command(about = "Execute directional trades with automatic sizing and protective orders", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    Long,
    Short,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Long => Direction::Long,
            DirectionArg::Short => Direction::Short,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a trade: entry, stop-loss, and take-profit legs
    Execute {
        /// Traded symbol, e.g. BTC
        #[arg(short, long)]
        symbol: String,

        /// Trade direction
        #[arg(short, long, value_enum)]
        direction: DirectionArg,

        /// Entry limit price
        #[arg(short, long)]
        entry: Decimal,

        /// Stop-loss trigger price
        #[arg(long)]
        stop_loss: Decimal,

        /// First take-profit target
        #[arg(long)]
        tp1: Decimal,

        /// Second take-profit target
        #[arg(long)]
        tp2: Decimal,

        /// Third take-profit target
        #[arg(long)]
        tp3: Decimal,

        /// Percentage of account value to commit (0.1 to 50)
        #[arg(short, long)]
        percentage: Decimal,

        /// Use the venue's testnet
        #[arg(long)]
        testnet: bool,

        /// Trade on behalf of a delegated account
        #[arg(long)]
        delegated_address: Option<String>,

        /// Run against an in-memory paper gateway (no credentials, no network)
        #[arg(long)]
        dry_run: bool,

        /// Account value assumed by the paper gateway
        #[arg(long, default_value = "10000")]
        paper_balance: Decimal,
    },

    /// Fetch and print the account snapshot for a symbol
    Balance {
        /// Symbol whose position to include in the snapshot
        #[arg(short, long, default_value = "BTC")]
        symbol: String,

        /// Account address (defaults to the signing wallet)
        #[arg(short, long)]
        address: Option<String>,

        /// Use the venue's testnet
        #[arg(long)]
        testnet: bool,
    },

    /// Cancel a resting order
    Cancel {
        /// Symbol the order belongs to
        #[arg(short, long)]
        symbol: String,

        /// Venue order ID
        #[arg(short, long)]
        order_id: String,

        /// Use the venue's testnet
        #[arg(long)]
        testnet: bool,
    },

    /// Print the active execution configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ExecutionConfig::default();

    match cli.command {
        Commands::Execute {
            symbol,
            direction,
            entry,
            stop_loss,
            tp1,
            tp2,
            tp3,
            percentage,
            testnet,
            delegated_address,
            dry_run,
            paper_balance,
        } => {
            let request = TradeRequest {
                symbol,
                direction: direction.into(),
                entry_price: entry,
                stop_loss,
                take_profit_1: tp1,
                take_profit_2: tp2,
                take_profit_3: tp3,
                portfolio_percentage: percentage,
                use_testnet: testnet,
                delegated_account_address: delegated_address.clone(),
            };

            let gateway: Arc<dyn ExchangeGateway> = if dry_run {
                info!(balance = %paper_balance, "Dry run: using paper gateway");
                Arc::new(PaperGateway::new(paper_balance))
            } else {
                let mut client = VenueClient::from_env(testnet)?;
                if let Some(address) = delegated_address {
                    client = client.with_vault_address(address);
                }
                Arc::new(client)
            };

            let executor = TradeExecutor::new(gateway, config);
            let result = executor.execute(request).await;

            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Balance {
            symbol,
            address,
            testnet,
        } => {
            let client = VenueClient::from_env(testnet)?;
            let snapshot = client
                .portfolio_snapshot(&symbol.to_uppercase(), address.as_deref())
                .await?;

            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }

        Commands::Cancel {
            symbol,
            order_id,
            testnet,
        } => {
            let client = VenueClient::from_env(testnet)?;
            let cancelled = client
                .cancel_order(&symbol.to_uppercase(), &order_id)
                .await?;

            if cancelled {
                println!("Cancelled order {}", order_id);
            } else {
                println!("Order {} was not open", order_id);
            }
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
