//! Period lock error types.

use chrono::NaiveDate;
use thiserror::Error;
use ucto_shared::AppError;
use ucto_shared::types::PeriodLockId;

use crate::repository::RepositoryError;

/// Errors raised by the period lock guard.
#[derive(Debug, Error)]
pub enum PeriodError {
    /// The date falls inside a locked period.
    #[error("Period {period_start} - {period_end} is locked; {date} cannot be posted")]
    PeriodLocked {
        /// The rejected date.
        date: NaiveDate,
        /// Start of the covering lock.
        period_start: NaiveDate,
        /// End of the covering lock.
        period_end: NaiveDate,
    },

    /// Start date after end date.
    #[error("Invalid period range: start {start} is after end {end}")]
    InvalidRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Lock record not found.
    #[error("Period lock not found: {0}")]
    NotFound(PeriodLockId),

    /// Persistence failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl PeriodError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PeriodLocked { .. } => "PERIOD_LOCKED",
            Self::InvalidRange { .. } => "INVALID_PERIOD_RANGE",
            Self::NotFound(_) => "PERIOD_LOCK_NOT_FOUND",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }
}

impl From<PeriodError> for AppError {
    fn from(err: PeriodError) -> Self {
        let msg = err.to_string();
        match err {
            PeriodError::PeriodLocked { .. } => Self::PeriodLocked(msg),
            PeriodError::InvalidRange { .. } => Self::Validation(msg),
            PeriodError::NotFound(_) => Self::NotFound(msg),
            PeriodError::Repository(inner) => inner.into(),
        }
    }
}
