//! Errors reported by persistence collaborators.

use thiserror::Error;
use ucto_shared::AppError;

/// Failure of a repository implementation.
///
/// Domain outcomes such as "not found" or "already posted" are expressed in
/// repository return values (`Option`, `bool`), never as errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A write conflicted with existing data (e.g. a unique key).
    #[error("Repository conflict: {0}")]
    Conflict(String),

    /// The store could not be reached or failed internally.
    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            RepositoryError::Unavailable(msg) => Self::Storage(msg),
        }
    }
}
