//! Chart of accounts error types.

use thiserror::Error;
use ucto_shared::AppError;
use ucto_shared::types::AccountId;

use crate::repository::RepositoryError;

/// Errors that can occur while maintaining the chart of accounts.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// Malformed synthetic or analytic code.
    #[error("Invalid account code: {0}")]
    InvalidCode(String),

    /// The (company, synthetic, analytic) triple is already taken.
    #[error("Account code {0} already exists")]
    DuplicateAccount(String),

    /// The account class has no natural type and none was given.
    #[error("Account type is required for class {0} accounts")]
    TypeRequired(u8),

    /// The change is not allowed in the account's current state.
    #[error("Invalid account state: {0}")]
    InvalidState(String),

    /// Persistence failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AccountError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InvalidCode(_) => "INVALID_ACCOUNT_CODE",
            Self::DuplicateAccount(_) => "DUPLICATE_ACCOUNT",
            Self::TypeRequired(_) => "ACCOUNT_TYPE_REQUIRED",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        let msg = err.to_string();
        match err {
            AccountError::NotFound(_) => Self::NotFound(msg),
            AccountError::InvalidCode(_) | AccountError::TypeRequired(_) => Self::Validation(msg),
            AccountError::DuplicateAccount(_) => Self::Conflict(msg),
            AccountError::InvalidState(_) => Self::BusinessRule(msg),
            AccountError::Repository(inner) => inner.into(),
        }
    }
}
