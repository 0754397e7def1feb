//! Depreciation service: asset registration and yearly recording.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};
use ucto_shared::types::{AssetId, CompanyId};

use super::error::DepreciationError;
use super::schedule::{depreciation_for_year, schedule_for, validate_asset};
use super::types::{Asset, AssetDepreciation, AssetStatus, NewAsset};
use crate::repository::RepositoryError;

/// Repository trait for assets and their recorded depreciation.
pub trait AssetRepository: Send + Sync {
    /// Stores a new asset.
    fn insert_asset(&self, asset: Asset)
    -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Finds an asset by id.
    fn find_asset(
        &self,
        id: AssetId,
    ) -> impl Future<Output = Result<Option<Asset>, RepositoryError>> + Send;

    /// Lists a company's assets.
    fn list_assets(
        &self,
        company_id: CompanyId,
    ) -> impl Future<Output = Result<Vec<Asset>, RepositoryError>> + Send;

    /// Replaces a stored asset. Returns false if it does not exist.
    fn update_asset(&self, asset: Asset)
    -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    /// Lists the recorded years of an asset in year order.
    fn list_depreciations(
        &self,
        asset_id: AssetId,
    ) -> impl Future<Output = Result<Vec<AssetDepreciation>, RepositoryError>> + Send;

    /// Stores one recorded year.
    ///
    /// Must fail with `RepositoryError::Conflict` if the (asset, year) pair
    /// already exists.
    fn insert_depreciation(
        &self,
        record: AssetDepreciation,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Depreciation service.
pub struct DepreciationService<R> {
    repo: Arc<R>,
}

impl<R: AssetRepository> DepreciationService<R> {
    /// Creates a depreciation service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Registers an asset after checking it has a statutory schedule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAsset` or `OutOfRange`.
    pub async fn register(&self, input: NewAsset) -> Result<Asset, DepreciationError> {
        let asset = Asset {
            id: AssetId::new(),
            company_id: input.company_id,
            name: input.name,
            acquisition_date: input.acquisition_date,
            acquisition_cost: input.acquisition_cost,
            depreciation_group: input.depreciation_group,
            depreciation_method: input.depreciation_method,
            useful_life_years: input.useful_life_years,
            tax_residual_value: input.tax_residual_value,
            accounting_residual_value: input.accounting_residual_value,
            status: AssetStatus::Active,
        };
        validate_asset(&asset)?;
        self.repo.insert_asset(asset.clone()).await?;

        debug!(
            asset_id = %asset.id,
            group = asset.depreciation_group,
            method = %asset.depreciation_method,
            "Asset registered"
        );
        Ok(asset)
    }

    /// Returns one asset.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the asset does not exist.
    pub async fn get(&self, asset_id: AssetId) -> Result<Asset, DepreciationError> {
        self.repo
            .find_asset(asset_id)
            .await?
            .ok_or(DepreciationError::NotFound(asset_id))
    }

    /// Returns the full computed schedule of an asset.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidAsset` or `OutOfRange`.
    pub async fn schedule(&self, asset_id: AssetId) -> Result<Vec<AssetDepreciation>, DepreciationError> {
        schedule_for(&self.get(asset_id).await?)
    }

    /// Returns the years recorded so far.
    ///
    /// # Errors
    ///
    /// Fails if the store fails.
    pub async fn recorded(&self, asset_id: AssetId) -> Result<Vec<AssetDepreciation>, DepreciationError> {
        Ok(self.repo.list_depreciations(asset_id).await?)
    }

    /// Records depreciation for one year.
    ///
    /// Years are recorded once each and in order, starting with the
    /// acquisition year.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidState` for a disposed asset,
    /// `OutOfRange` outside the schedule, `DuplicatePeriod` or
    /// `SequenceGap`.
    pub async fn record_year(
        &self,
        asset_id: AssetId,
        year: i32,
    ) -> Result<AssetDepreciation, DepreciationError> {
        let result = self.try_record_year(asset_id, year).await;
        match &result {
            Ok(record) => info!(
                asset_id = %asset_id,
                year,
                tax_depreciation = %record.tax_depreciation,
                accounting_depreciation = %record.accounting_depreciation,
                "Depreciation recorded"
            ),
            Err(err) => warn!(
                asset_id = %asset_id,
                year,
                error_code = err.error_code(),
                error = %err,
                "Depreciation rejected"
            ),
        }
        result
    }

    async fn try_record_year(
        &self,
        asset_id: AssetId,
        year: i32,
    ) -> Result<AssetDepreciation, DepreciationError> {
        let asset = self.get(asset_id).await?;
        if asset.is_disposed() {
            return Err(DepreciationError::InvalidState(format!(
                "asset {asset_id} is disposed"
            )));
        }

        let row = depreciation_for_year(&asset, year)?.ok_or_else(|| {
            DepreciationError::OutOfRange(format!(
                "{year} is outside the depreciation schedule of asset {asset_id}"
            ))
        })?;

        let recorded = self.repo.list_depreciations(asset_id).await?;
        if recorded.iter().any(|r| r.year == year) {
            return Err(DepreciationError::DuplicatePeriod { asset_id, year });
        }
        if year > asset.acquisition_year() && !recorded.iter().any(|r| r.year == year - 1) {
            return Err(DepreciationError::SequenceGap { asset_id, year });
        }

        match self.repo.insert_depreciation(row.clone()).await {
            Ok(()) => Ok(row),
            Err(RepositoryError::Conflict(_)) => {
                Err(DepreciationError::DuplicatePeriod { asset_id, year })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Marks an asset as disposed. Recorded years are kept.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `InvalidState` if already disposed.
    pub async fn dispose(&self, asset_id: AssetId) -> Result<Asset, DepreciationError> {
        let mut asset = self.get(asset_id).await?;
        if asset.is_disposed() {
            return Err(DepreciationError::InvalidState(format!(
                "asset {asset_id} is already disposed"
            )));
        }
        asset.status = AssetStatus::Disposed;
        if !self.repo.update_asset(asset.clone()).await? {
            return Err(DepreciationError::NotFound(asset_id));
        }
        info!(asset_id = %asset_id, "Asset disposed");
        Ok(asset)
    }
}
