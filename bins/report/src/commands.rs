//! Subcommand handlers.

use std::sync::Arc;

use serde_json::{Value, json};
use ucto_core::depreciation::{DepreciationService, depreciation_for_year};
use ucto_core::reports::LedgerQueryService;
use ucto_core::tax::TaxService;
use ucto_shared::AppConfig;
use ucto_store::MemoryStore;

use crate::Commands;

/// Runs one subcommand and returns its report.
pub async fn run(
    command: Commands,
    store: Arc<MemoryStore>,
    config: &AppConfig,
) -> anyhow::Result<Value> {
    let ledger = || LedgerQueryService::with_config(Arc::clone(&store), &config.ledger);
    let tax = || TaxService::with_config(Arc::clone(&store), &config.tax);

    let report = match command {
        Commands::TrialBalance {
            company,
            as_of,
            include_zero,
        } => serde_json::to_value(ledger().trial_balance(company, as_of, include_zero).await?)?,
        Commands::Ledger { account, from, to } => {
            serde_json::to_value(ledger().account_ledger(account, from, to).await?)?
        }
        Commands::Dph { company, from, to } => {
            serde_json::to_value(tax().periodic_return(company, from, to).await?)?
        }
        Commands::KvDph { company, from, to } => {
            let statement = tax().control_statement(company, from, to).await?;
            json!({
                "counts": statement.counts(),
                "statement": statement,
            })
        }
        Commands::Sv { company, from, to } => {
            serde_json::to_value(tax().summary_statement(company, from, to).await?)?
        }
        Commands::Depreciation { asset, year } => {
            let service = DepreciationService::new(Arc::clone(&store));
            let record = service.get(asset).await?;
            match year {
                Some(year) => json!({
                    "asset": record,
                    "year": year,
                    "depreciation": depreciation_for_year(&record, year)?,
                }),
                None => json!({
                    "asset": record,
                    "schedule": service.schedule(asset).await?,
                    "recorded": service.recorded(asset).await?,
                }),
            }
        }
    };
    Ok(report)
}
