//! Depreciation schedules.
//!
//! Tax depreciation follows the asset's method: straight-line over
//! `useful_life_years`, or accelerated over the statutory life of its group.
//! Accounting depreciation is straight-line over `useful_life_years`. Every
//! yearly amount is rounded to cents and the last year of each life takes
//! whatever is left, so each schedule sums to cost minus residual exactly.

use rust_decimal::Decimal;
use ucto_shared::types::round_money;

use super::error::DepreciationError;
use super::tables::{AcceleratedCoefficients, GroupRule, group_rule};
use super::types::{Asset, AssetDepreciation, DepreciationMethod};

/// Highest statutory depreciation group.
pub const MAX_GROUP: u8 = 6;

/// Longest accepted accounting life in years.
pub const MAX_USEFUL_LIFE_YEARS: u32 = 100;

/// Checks the asset's attributes and returns its statutory rule.
///
/// # Errors
///
/// Returns `InvalidAsset` for inconsistent attributes and `OutOfRange` when
/// the tables have no rule for the group, acquisition year and method.
pub fn validate_asset(asset: &Asset) -> Result<&'static GroupRule, DepreciationError> {
    if asset.acquisition_cost <= Decimal::ZERO {
        return Err(DepreciationError::InvalidAsset(
            "acquisition cost must be positive".into(),
        ));
    }
    if asset.useful_life_years == 0 {
        return Err(DepreciationError::InvalidAsset(
            "useful life must be at least one year".into(),
        ));
    }
    if asset.useful_life_years > MAX_USEFUL_LIFE_YEARS {
        return Err(DepreciationError::InvalidAsset(format!(
            "useful life of {} years exceeds {MAX_USEFUL_LIFE_YEARS}",
            asset.useful_life_years
        )));
    }
    for (label, residual) in [
        ("tax", asset.tax_residual_value),
        ("accounting", asset.accounting_residual_value),
    ] {
        if residual < Decimal::ZERO || residual > asset.acquisition_cost {
            return Err(DepreciationError::InvalidAsset(format!(
                "{label} residual value {residual} is outside 0..={}",
                asset.acquisition_cost
            )));
        }
    }
    if asset.depreciation_group > MAX_GROUP {
        return Err(DepreciationError::InvalidAsset(format!(
            "depreciation group {} is outside 0..={MAX_GROUP}",
            asset.depreciation_group
        )));
    }

    let year = asset.acquisition_year();
    let rule = group_rule(year, asset.depreciation_group).ok_or_else(|| {
        DepreciationError::OutOfRange(format!(
            "no statutory rule for group {} acquired in {year}",
            asset.depreciation_group
        ))
    })?;
    if !rule.allows(asset.depreciation_method) {
        return Err(DepreciationError::OutOfRange(format!(
            "group {} has no {} coefficients for assets acquired in {year}",
            asset.depreciation_group, asset.depreciation_method
        )));
    }
    Ok(rule)
}

fn straight_line(cost: Decimal, residual: Decimal, life: u32) -> Vec<Decimal> {
    let annual = round_money(cost / Decimal::from(life));
    let mut remaining = cost - residual;
    (0..life)
        .map(|year| {
            let amount = if year + 1 == life {
                remaining
            } else {
                annual.min(remaining)
            };
            remaining -= amount;
            amount
        })
        .collect()
}

fn accelerated(
    cost: Decimal,
    residual: Decimal,
    life: u32,
    coefficients: AcceleratedCoefficients,
) -> Vec<Decimal> {
    let mut remaining = cost - residual;
    (0..life)
        .map(|elapsed| {
            let divisor = if elapsed == 0 {
                coefficients.first_year
            } else {
                coefficients.later_years.saturating_sub(elapsed)
            };
            let amount = if elapsed + 1 == life || divisor == 0 {
                remaining
            } else if elapsed == 0 {
                round_money(remaining / Decimal::from(divisor)).min(remaining)
            } else {
                round_money(Decimal::TWO * remaining / Decimal::from(divisor)).min(remaining)
            };
            remaining -= amount;
            amount
        })
        .collect()
}

/// Tax depreciation amounts per year from the acquisition year.
fn tax_amounts(asset: &Asset, rule: &GroupRule) -> Vec<Decimal> {
    match (asset.depreciation_method, rule.accelerated) {
        (DepreciationMethod::Accelerated, Some(coefficients)) => accelerated(
            asset.acquisition_cost,
            asset.tax_residual_value,
            rule.life_years,
            coefficients,
        ),
        _ => straight_line(
            asset.acquisition_cost,
            asset.tax_residual_value,
            asset.useful_life_years,
        ),
    }
}

/// Computes the full schedule from the acquisition year.
///
/// The schedule covers the longer of the tax and accounting lives; years
/// past the end of one life carry zero for it.
///
/// # Errors
///
/// Returns `InvalidAsset` or `OutOfRange` from [`validate_asset`].
pub fn schedule_for(asset: &Asset) -> Result<Vec<AssetDepreciation>, DepreciationError> {
    let rule = validate_asset(asset)?;
    let tax = tax_amounts(asset, rule);
    let accounting = straight_line(
        asset.acquisition_cost,
        asset.accounting_residual_value,
        asset.useful_life_years,
    );

    let years = tax.len().max(accounting.len());
    let mut tax_accumulated = Decimal::ZERO;
    let mut accounting_accumulated = Decimal::ZERO;
    let rows = (asset.acquisition_year()..)
        .take(years)
        .enumerate()
        .map(|(index, year)| {
            let tax_depreciation = tax.get(index).copied().unwrap_or_default();
            let accounting_depreciation = accounting.get(index).copied().unwrap_or_default();
            tax_accumulated += tax_depreciation;
            accounting_accumulated += accounting_depreciation;
            AssetDepreciation {
                asset_id: asset.id,
                year,
                tax_depreciation,
                accounting_depreciation,
                tax_accumulated,
                accounting_accumulated,
                tax_net_value: asset.acquisition_cost - tax_accumulated,
                accounting_net_value: asset.acquisition_cost - accounting_accumulated,
            }
        })
        .collect();
    Ok(rows)
}

/// Returns the schedule row for `year`, or `None` outside the schedule.
///
/// # Errors
///
/// Returns `InvalidAsset` or `OutOfRange` when no schedule can be built.
pub fn depreciation_for_year(
    asset: &Asset,
    year: i32,
) -> Result<Option<AssetDepreciation>, DepreciationError> {
    Ok(schedule_for(asset)?.into_iter().find(|row| row.year == year))
}
