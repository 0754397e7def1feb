//! Ucto report CLI
//!
//! Loads a JSON company snapshot into the in-memory store and prints ledger,
//! VAT and depreciation reports as JSON on stdout.

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};
use ucto_shared::types::{AccountId, AssetId, CompanyId};
use ucto_shared::{AppConfig, LogConfig, LogFormat};
use ucto_store::MemoryStore;

#[derive(Parser)]
#[command(name = "ucto-report")]
#[command(about = "Ledger, VAT and depreciation reports over a company snapshot")]
#[command(version)]
struct Cli {
    /// JSON snapshot to load
    #[arg(long, short)]
    snapshot: PathBuf,

    /// Print compact JSON instead of indented
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trial balance of a company (obratová predvaha)
    TrialBalance {
        #[arg(long)]
        company: CompanyId,
        /// Last day included
        #[arg(long)]
        as_of: NaiveDate,
        /// Also list accounts without movements
        #[arg(long)]
        include_zero: bool,
    },

    /// Ledger of one account (hlavná kniha)
    Ledger {
        #[arg(long)]
        account: AccountId,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },

    /// Periodic VAT return (DPH)
    Dph {
        #[arg(long)]
        company: CompanyId,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },

    /// VAT control statement (KV DPH)
    KvDph {
        #[arg(long)]
        company: CompanyId,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },

    /// EU summary statement (SV)
    Sv {
        #[arg(long)]
        company: CompanyId,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },

    /// Depreciation schedule of an asset
    Depreciation {
        #[arg(long)]
        asset: AssetId,
        /// Only this fiscal year
        #[arg(long)]
        year: Option<i32>,
    },
}

fn init_tracing(config: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);

    // Reports go to stdout, logs to stderr.
    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load()?;
    init_tracing(&config.log);

    let cli = Cli::parse();
    let store = Arc::new(MemoryStore::load_json(&cli.snapshot)?);
    info!(snapshot = %cli.snapshot.display(), "Store ready");

    let report = commands::run(cli.command, store, &config).await?;
    let json = if cli.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{json}");
    Ok(())
}
