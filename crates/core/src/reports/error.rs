//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;
use ucto_shared::AppError;
use ucto_shared::types::AccountId;

use crate::accounts::AccountError;
use crate::repository::RepositoryError;

/// Errors that can occur while building ledger reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The account does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// The range ends before it starts.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        /// Start of the range.
        from: NaiveDate,
        /// End of the range.
        to: NaiveDate,
    },

    /// Stored accounts are inconsistent.
    #[error("Chart of accounts error: {0}")]
    Chart(String),

    /// Persistence failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::Chart(_) => "CHART_INCONSISTENT",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }
}

impl From<AccountError> for ReportError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(id) => Self::AccountNotFound(id),
            AccountError::Repository(inner) => Self::Repository(inner),
            other => Self::Chart(other.to_string()),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        let msg = err.to_string();
        match err {
            ReportError::AccountNotFound(_) => Self::NotFound(msg),
            ReportError::InvalidDateRange { .. } => Self::Validation(msg),
            ReportError::Chart(_) => Self::Internal(msg),
            ReportError::Repository(inner) => inner.into(),
        }
    }
}
