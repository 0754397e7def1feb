//! Journal error types for validation and state errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use ucto_shared::AppError;
use ucto_shared::types::{AccountId, JournalEntryId};

use super::types::EntryStatus;
use crate::period::PeriodError;
use crate::repository::RepositoryError;

/// Errors that can occur during journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    // ========== Lookup ==========
    /// Entry not found.
    #[error("Journal entry not found: {0}")]
    NotFound(JournalEntryId),

    // ========== State ==========
    /// The entry is not in the state the operation requires.
    #[error("Journal entry {id} is {status}; expected {expected}")]
    InvalidState {
        /// The entry.
        id: JournalEntryId,
        /// Its current status.
        status: EntryStatus,
        /// The status the operation requires.
        expected: EntryStatus,
    },

    /// The entry date falls inside a locked period.
    #[error("Period {period_start} - {period_end} is locked; entry dated {date} cannot be posted")]
    PeriodLocked {
        /// The entry date.
        date: NaiveDate,
        /// Start of the covering lock.
        period_start: NaiveDate,
        /// End of the covering lock.
        period_end: NaiveDate,
    },

    // ========== Posting validation ==========
    /// Debit and credit sums differ by more than the tolerance.
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Sum of debit lines.
        debit: Decimal,
        /// Sum of credit lines.
        credit: Decimal,
    },

    /// The entry has no lines.
    #[error("Journal entry has no lines")]
    EmptyEntry,

    /// A line references an account that does not exist in the company.
    #[error("Account not found: {0}")]
    UnknownAccount(AccountId),

    /// A line references an inactive account.
    #[error("Account {0} is inactive")]
    InactiveAccount(AccountId),

    // ========== Draft validation ==========
    /// Malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    // ========== Persistence ==========
    /// Persistence failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl JournalError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "JOURNAL_ENTRY_NOT_FOUND",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::PeriodLocked { .. } => "PERIOD_LOCKED",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::EmptyEntry => "EMPTY_ENTRY",
            Self::UnknownAccount(_) => "ACCOUNT_NOT_FOUND",
            Self::InactiveAccount(_) => "ACCOUNT_INACTIVE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::UnbalancedEntry { .. }
            | Self::EmptyEntry
            | Self::UnknownAccount(_)
            | Self::InactiveAccount(_)
            | Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::InvalidState { .. } => 409,
            Self::PeriodLocked { .. } => 423,
            Self::Repository(_) => 500,
        }
    }
}

impl From<PeriodError> for JournalError {
    fn from(err: PeriodError) -> Self {
        match err {
            PeriodError::PeriodLocked {
                date,
                period_start,
                period_end,
            } => Self::PeriodLocked {
                date,
                period_start,
                period_end,
            },
            PeriodError::Repository(inner) => Self::Repository(inner),
            other => Self::Validation(other.to_string()),
        }
    }
}

impl From<JournalError> for AppError {
    fn from(err: JournalError) -> Self {
        let msg = err.to_string();
        match err {
            JournalError::NotFound(_) => Self::NotFound(msg),
            JournalError::InvalidState { .. } => Self::Conflict(msg),
            JournalError::PeriodLocked { .. } => Self::PeriodLocked(msg),
            JournalError::UnbalancedEntry { .. }
            | JournalError::EmptyEntry
            | JournalError::UnknownAccount(_)
            | JournalError::InactiveAccount(_) => Self::BusinessRule(msg),
            JournalError::Validation(_) => Self::Validation(msg),
            JournalError::Repository(inner) => inner.into(),
        }
    }
}
