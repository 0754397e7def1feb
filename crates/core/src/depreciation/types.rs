//! Fixed asset and depreciation types.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ucto_shared::types::{AssetId, CompanyId};

/// Tax depreciation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationMethod {
    /// Rovnomerné odpisovanie.
    StraightLine,
    /// Zrýchlené odpisovanie.
    Accelerated,
}

impl std::fmt::Display for DepreciationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StraightLine => write!(f, "straight_line"),
            Self::Accelerated => write!(f, "accelerated"),
        }
    }
}

/// Asset lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// In use and depreciating.
    #[default]
    Active,
    /// Sold or scrapped; no further depreciation.
    Disposed,
}

/// A fixed asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique identifier.
    pub id: AssetId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Asset name.
    pub name: String,
    /// Date the asset was put into use.
    pub acquisition_date: NaiveDate,
    /// Acquisition cost (vstupná cena).
    pub acquisition_cost: Decimal,
    /// Statutory depreciation group, 0 to 6.
    pub depreciation_group: u8,
    /// Tax depreciation method.
    pub depreciation_method: DepreciationMethod,
    /// Useful life for accounting and straight-line tax depreciation.
    pub useful_life_years: u32,
    /// Value tax depreciation stops at.
    #[serde(default)]
    pub tax_residual_value: Decimal,
    /// Value accounting depreciation stops at.
    #[serde(default)]
    pub accounting_residual_value: Decimal,
    /// Lifecycle status.
    #[serde(default)]
    pub status: AssetStatus,
}

impl Asset {
    /// Year of acquisition.
    #[must_use]
    pub fn acquisition_year(&self) -> i32 {
        self.acquisition_date.year()
    }

    /// Returns true if the asset was disposed of.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.status == AssetStatus::Disposed
    }
}

/// Input for registering an asset.
#[derive(Debug, Clone)]
pub struct NewAsset {
    /// Owning company.
    pub company_id: CompanyId,
    /// Asset name.
    pub name: String,
    /// Date the asset was put into use.
    pub acquisition_date: NaiveDate,
    /// Acquisition cost.
    pub acquisition_cost: Decimal,
    /// Statutory depreciation group.
    pub depreciation_group: u8,
    /// Tax depreciation method.
    pub depreciation_method: DepreciationMethod,
    /// Useful life in years.
    pub useful_life_years: u32,
    /// Tax residual value.
    pub tax_residual_value: Decimal,
    /// Accounting residual value.
    pub accounting_residual_value: Decimal,
}

/// One fiscal year of depreciation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDepreciation {
    /// The asset.
    pub asset_id: AssetId,
    /// Fiscal year.
    pub year: i32,
    /// Tax depreciation for the year.
    pub tax_depreciation: Decimal,
    /// Accounting depreciation for the year.
    pub accounting_depreciation: Decimal,
    /// Tax depreciation to date.
    pub tax_accumulated: Decimal,
    /// Accounting depreciation to date.
    pub accounting_accumulated: Decimal,
    /// Tax net book value at year end.
    pub tax_net_value: Decimal,
    /// Accounting net book value at year end.
    pub accounting_net_value: Decimal,
}
