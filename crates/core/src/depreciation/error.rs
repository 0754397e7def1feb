//! Depreciation error types.

use thiserror::Error;
use ucto_shared::AppError;
use ucto_shared::types::AssetId;

use crate::repository::RepositoryError;

/// Errors that can occur while scheduling or recording depreciation.
#[derive(Debug, Error)]
pub enum DepreciationError {
    /// Asset not found.
    #[error("Asset not found: {0}")]
    NotFound(AssetId),

    /// The asset's state forbids the operation.
    #[error("Invalid asset state: {0}")]
    InvalidState(String),

    /// Depreciation for the year is already recorded.
    #[error("Depreciation for {year} is already recorded for asset {asset_id}")]
    DuplicatePeriod {
        /// The asset.
        asset_id: AssetId,
        /// The year.
        year: i32,
    },

    /// The previous year has not been recorded yet.
    #[error("Depreciation for {year} requires {} to be recorded first", year - 1)]
    SequenceGap {
        /// The asset.
        asset_id: AssetId,
        /// The requested year.
        year: i32,
    },

    /// No statutory rule or schedule row applies.
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Asset attributes are inconsistent.
    #[error("Invalid asset: {0}")]
    InvalidAsset(String),

    /// Persistence failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl DepreciationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "ASSET_NOT_FOUND",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::DuplicatePeriod { .. } => "DUPLICATE_PERIOD",
            Self::SequenceGap { .. } => "SEQUENCE_GAP",
            Self::OutOfRange(_) => "OUT_OF_RANGE",
            Self::InvalidAsset(_) => "INVALID_ASSET",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }
}

impl From<DepreciationError> for AppError {
    fn from(err: DepreciationError) -> Self {
        let msg = err.to_string();
        match err {
            DepreciationError::NotFound(_) => Self::NotFound(msg),
            DepreciationError::InvalidState(_)
            | DepreciationError::SequenceGap { .. }
            | DepreciationError::OutOfRange(_) => Self::BusinessRule(msg),
            DepreciationError::DuplicatePeriod { .. } => Self::Conflict(msg),
            DepreciationError::InvalidAsset(_) => Self::Validation(msg),
            DepreciationError::Repository(inner) => inner.into(),
        }
    }
}
