//! Property-based tests for depreciation schedules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use ucto_shared::types::{AssetId, CompanyId};

use super::schedule::schedule_for;
use super::types::{Asset, AssetStatus, DepreciationMethod};

fn cents(max: i64) -> impl Strategy<Value = Decimal> {
    (1i64..max).prop_map(|c| Decimal::new(c, 2))
}

/// Straight-line assets in any group, or accelerated assets in groups 2 and 3.
fn asset_strategy() -> impl Strategy<Value = Asset> {
    (
        cents(100_000_000),
        prop_oneof![
            (1u8..=6).prop_map(|g| (g, DepreciationMethod::StraightLine)),
            (2u8..=3).prop_map(|g| (g, DepreciationMethod::Accelerated)),
        ],
        1u32..=40,
        2020i32..=2030,
        0u32..=100,
        0u32..=100,
    )
        .prop_map(|(cost, (group, method), life, year, tax_pct, acc_pct)| {
            let share = |pct: u32| {
                ucto_shared::types::round_money(cost * Decimal::from(pct) / Decimal::ONE_HUNDRED)
            };
            Asset {
                id: AssetId::new(),
                company_id: CompanyId::new(),
                name: "Machine".into(),
                acquisition_date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
                acquisition_cost: cost,
                depreciation_group: group,
                depreciation_method: method,
                useful_life_years: life,
                tax_residual_value: share(tax_pct),
                accounting_residual_value: share(acc_pct),
                status: AssetStatus::Active,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Tax and accounting depreciation each sum to cost minus residual.
    #[test]
    fn prop_depreciation_conservation(asset in asset_strategy()) {
        let rows = schedule_for(&asset).unwrap();
        let tax: Decimal = rows.iter().map(|r| r.tax_depreciation).sum();
        let accounting: Decimal = rows.iter().map(|r| r.accounting_depreciation).sum();

        prop_assert_eq!(tax, asset.acquisition_cost - asset.tax_residual_value);
        prop_assert_eq!(accounting, asset.acquisition_cost - asset.accounting_residual_value);
    }

    /// Net value never drops below the residual and equals cost minus
    /// accumulated depreciation in every row.
    #[test]
    fn prop_net_value_clamped(asset in asset_strategy()) {
        for row in schedule_for(&asset).unwrap() {
            prop_assert!(row.tax_depreciation >= Decimal::ZERO);
            prop_assert!(row.accounting_depreciation >= Decimal::ZERO);
            prop_assert_eq!(row.tax_net_value, asset.acquisition_cost - row.tax_accumulated);
            prop_assert!(row.tax_net_value >= asset.tax_residual_value);
            prop_assert!(row.accounting_net_value >= asset.accounting_residual_value);
        }
    }

    /// Years are contiguous from the acquisition year.
    #[test]
    fn prop_years_contiguous(asset in asset_strategy()) {
        let rows = schedule_for(&asset).unwrap();
        prop_assert_eq!(rows[0].year, asset.acquisition_year());
        prop_assert!(rows.windows(2).all(|w| w[1].year == w[0].year + 1));
    }
}
