mod config;
mod error;
mod models;
mod notify;
mod orchestrator;
mod reconcile;
mod scrapers;
mod store;

use clap::Parser;
use config::Config;
use notify::LogNotifier;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use store::ListingStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Listing Scout - new real-estate listings from DuProprio, Royal LePage and Centris")]
struct Args {
    /// Path to the JSON config with the search URLs
    #[clap(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Path to the JSON store of previously seen listings
    #[clap(short, long, default_value = "listings.json")]
    store: PathBuf,

    /// Log progress to stderr (-v for info, -vv for debug)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "off",
        1 => "info",
        _ => "debug",
    };

    // Logs stay on stderr; stdout carries only the result line
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    info!("🏠 Listing Scout");

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            println!(
                "{}",
                json!({ "success": false, "message": format!("{:#}", e), "status": "Loading config" })
            );
            return ExitCode::FAILURE;
        }
    };

    let store = ListingStore::new(args.store);
    info!("Using store {}", store.path().display());
    let today = chrono::Local::now().date_naive();

    match orchestrator::execute(&config, &store, &LogNotifier, today).await {
        Ok(summary) => {
            info!("{} listings in store", summary.stored_count);
            println!("{}", json!({ "success": true, "message": summary.message() }));
            ExitCode::SUCCESS
        }
        Err(failure) => {
            println!(
                "{}",
                json!({
                    "success": false,
                    "message": format!("{:#}", failure.cause),
                    "status": failure.status,
                })
            );
            ExitCode::FAILURE
        }
    }
}
