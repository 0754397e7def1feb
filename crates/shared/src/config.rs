//! Application configuration management.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Journal and ledger configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// VAT engine configuration.
    #[serde(default)]
    pub tax: TaxConfig,
    /// Log output configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Journal and ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Maximum absolute debit/credit difference accepted at posting.
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: Decimal,
    /// Functional currency of the books.
    #[serde(default)]
    pub base_currency: Currency,
}

fn default_balance_tolerance() -> Decimal {
    Decimal::new(5, 3)
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            balance_tolerance: default_balance_tolerance(),
            base_currency: Currency::default(),
        }
    }
}

/// VAT engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// ISO 3166 alpha-2 country of the VAT registration.
    #[serde(default = "default_vat_country")]
    pub vat_country: String,
}

fn default_vat_country() -> String {
    "SK".to_string()
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            vat_country: default_vat_country(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown log format: {s}")),
        }
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "ucto=debug".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("UCTO").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Loads `.env` (if present) and then the layered configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load_with_dotenv() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }
}
