//! VAT engine error types.
//!
//! The computations themselves never fail on data shape; unusable lines
//! become warnings. Only period construction and the store can fail.

use chrono::NaiveDate;
use thiserror::Error;
use ucto_shared::AppError;

use crate::repository::RepositoryError;

/// Errors that can occur in the VAT engine.
#[derive(Debug, Error)]
pub enum TaxError {
    /// The period ends before it starts.
    #[error("Invalid tax period: {from} is after {to}")]
    InvalidPeriod {
        /// First day.
        from: NaiveDate,
        /// Last day.
        to: NaiveDate,
    },

    /// The month or quarter does not exist.
    #[error("Invalid tax period month {month} of {year}")]
    InvalidMonth {
        /// Year.
        year: i32,
        /// Month.
        month: u32,
    },

    /// Persistence failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl TaxError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPeriod { .. } | Self::InvalidMonth { .. } => "INVALID_TAX_PERIOD",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }
}

impl From<TaxError> for AppError {
    fn from(err: TaxError) -> Self {
        let msg = err.to_string();
        match err {
            TaxError::InvalidPeriod { .. } | TaxError::InvalidMonth { .. } => Self::Validation(msg),
            TaxError::Repository(inner) => inner.into(),
        }
    }
}
