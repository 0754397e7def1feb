//! Depreciation recording against the in-memory store.

mod common;

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use ucto_core::depreciation::{DepreciationError, DepreciationMethod, DepreciationService, NewAsset};
use ucto_shared::types::CompanyId;
use ucto_store::MemoryStore;

use common::date;

fn laptop(company_id: CompanyId) -> NewAsset {
    NewAsset {
        company_id,
        name: "Notebook".to_string(),
        acquisition_date: date(2024, 3, 1),
        acquisition_cost: dec!(10000),
        depreciation_group: 1,
        depreciation_method: DepreciationMethod::StraightLine,
        useful_life_years: 4,
        tax_residual_value: Decimal::ZERO,
        accounting_residual_value: Decimal::ZERO,
    }
}

#[tokio::test]
async fn test_straight_line_recorded_year_by_year() {
    let service = DepreciationService::new(Arc::new(MemoryStore::new()));
    let asset = service.register(laptop(CompanyId::new())).await.unwrap();

    for year in 2024..=2027 {
        let row = service.record_year(asset.id, year).await.unwrap();
        assert_eq!(row.tax_depreciation, dec!(2500.00));
    }

    let recorded = service.recorded(asset.id).await.unwrap();
    assert_eq!(recorded.len(), 4);
    let last = recorded.last().unwrap();
    assert_eq!(last.year, 2027);
    assert_eq!(last.tax_accumulated, dec!(10000.00));
    assert_eq!(last.tax_net_value, Decimal::ZERO);
}

#[tokio::test]
async fn test_years_recorded_once_and_in_order() {
    let service = DepreciationService::new(Arc::new(MemoryStore::new()));
    let asset = service.register(laptop(CompanyId::new())).await.unwrap();

    let gap = service.record_year(asset.id, 2025).await;
    assert!(matches!(gap, Err(DepreciationError::SequenceGap { year: 2025, .. })));

    service.record_year(asset.id, 2024).await.unwrap();
    let duplicate = service.record_year(asset.id, 2024).await;
    assert!(matches!(
        duplicate,
        Err(DepreciationError::DuplicatePeriod { year: 2024, .. })
    ));

    let outside = service.record_year(asset.id, 2028).await;
    assert!(matches!(outside, Err(DepreciationError::OutOfRange(_))));
}

#[tokio::test]
async fn test_disposed_asset_not_depreciated() {
    let service = DepreciationService::new(Arc::new(MemoryStore::new()));
    let asset = service.register(laptop(CompanyId::new())).await.unwrap();
    service.record_year(asset.id, 2024).await.unwrap();

    let disposed = service.dispose(asset.id).await.unwrap();
    assert!(disposed.is_disposed());

    let result = service.record_year(asset.id, 2025).await;
    assert!(matches!(result, Err(DepreciationError::InvalidState(_))));
    assert!(matches!(
        service.dispose(asset.id).await,
        Err(DepreciationError::InvalidState(_))
    ));
}

#[tokio::test]
async fn test_accelerated_schedule_through_service() {
    let service = DepreciationService::new(Arc::new(MemoryStore::new()));
    let asset = service
        .register(NewAsset {
            name: "Dodávka".to_string(),
            acquisition_date: date(2025, 6, 1),
            acquisition_cost: dec!(12000),
            depreciation_group: 2,
            depreciation_method: DepreciationMethod::Accelerated,
            useful_life_years: 6,
            ..laptop(CompanyId::new())
        })
        .await
        .unwrap();

    let amounts: Vec<Decimal> = service
        .schedule(asset.id)
        .await
        .unwrap()
        .iter()
        .map(|row| row.tax_depreciation)
        .collect();
    assert_eq!(
        amounts,
        vec![
            dec!(2000.00),
            dec!(3333.33),
            dec!(2666.67),
            dec!(2000.00),
            dec!(1333.33),
            dec!(666.67),
        ]
    );
}
