//! Fixed asset depreciation.
//!
//! Statutory tables, pure schedule computation and the service that records
//! one fiscal year at a time.

pub mod error;
pub mod schedule;
pub mod service;
pub mod tables;
pub mod types;

#[cfg(test)]
mod schedule_props;

pub use error::DepreciationError;
pub use schedule::{MAX_USEFUL_LIFE_YEARS, depreciation_for_year, schedule_for, validate_asset};
pub use service::{AssetRepository, DepreciationService};
pub use tables::{AcceleratedCoefficients, GroupRule, group_rule};
pub use types::{Asset, AssetDepreciation, AssetStatus, DepreciationMethod, NewAsset};
