use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use cipherseek_core::logging::{init_logging_with_config, LogConfig, LogLevel};
use cipherseek_core::{
    Address, CategoryFilter, Config, MemoryLedger, MockEncryptionProvider, MockOracle,
    QueryLifecycle, QuerySubmission, StaticWallet,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cipherseek")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON formatted logging
    #[arg(long)]
    json_logs: bool,

    /// Account address to act as
    #[arg(long, default_value = "0xdemo")]
    account: String,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Submit an encrypted search, then decrypt and verify it
    Demo {
        /// Keyword code to search for
        #[arg(default_value = "42")]
        keyword: String,

        /// Category code for the record
        #[arg(short, long, default_value = "1")]
        category: String,
    },
    /// Submit an encrypted search and print the record as JSON
    Search {
        /// Keyword code to search for
        keyword: String,

        /// Category code for the record
        #[arg(short, long, default_value = "1")]
        category: String,
    },
    /// Probe ledger availability
    Check,
}

fn build_lifecycle(account: &str) -> QueryLifecycle {
    // Stand-in services; a deployment swaps in real provider/contract/oracle
    // implementations behind the same seams
    QueryLifecycle::new(
        Arc::new(Config::from_env().unwrap_or_default()),
        Arc::new(StaticWallet::connected(Address::new(account))),
        Arc::new(MockEncryptionProvider::new()),
        Arc::new(MemoryLedger::new(Address::new("0xcontract"))),
        Arc::new(MockOracle::new()),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Parse log level
    let log_level = args.log_level.parse().unwrap_or_else(|_| {
        eprintln!("Invalid log level '{}', using 'info'", args.log_level);
        LogLevel::Info
    });

    // Initialize logging
    let config = LogConfig::new(log_level).json_format(args.json_logs);
    init_logging_with_config(config)?;

    cipherseek_core::metrics::init_metrics();
    info!("Cipherseek CLI started");

    match args.command {
        Some(Command::Demo { keyword, category }) => {
            let lifecycle = build_lifecycle(&args.account);
            lifecycle.ensure_initialized().await?;

            let id = lifecycle
                .submit_search(QuerySubmission::new(keyword, category))
                .await?;
            info!(record_id = %id, "Encrypted search recorded");

            let value = lifecycle.decrypt_record(&id).await?;
            info!(record_id = %id, clear_value = ?value, "Record verified");

            lifecycle.set_filter(CategoryFilter::Verified).await;
            for record in lifecycle.filtered_records().await {
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
        }
        Some(Command::Search { keyword, category }) => {
            let lifecycle = build_lifecycle(&args.account);
            let id = lifecycle
                .submit_search(QuerySubmission::new(keyword, category))
                .await?;
            let records = lifecycle.records().await;
            if let Some(record) = records.iter().find(|r| r.id == id) {
                println!("{}", serde_json::to_string_pretty(record)?);
            }
        }
        Some(Command::Check) => {
            let lifecycle = build_lifecycle(&args.account);
            lifecycle.check_availability().await;
            let view = lifecycle.view_state().await;
            if let Some(status) = view.status {
                println!("{}", status.message);
            }
        }
        None => {
            info!("No command specified. Use --help for usage information.");
        }
    }

    info!("Cipherseek CLI finished");

    Ok(())
}
