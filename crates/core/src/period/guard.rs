//! Period lock checks used by every write path that touches posted state.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use ucto_shared::types::{CompanyId, PeriodLockId};

use super::error::PeriodError;
use super::types::PeriodLock;
use crate::repository::RepositoryError;

/// Repository trait for period lock persistence.
pub trait PeriodLockRepository: Send + Sync {
    /// Lists all lock records (locked or not) of a company.
    fn list_period_locks(
        &self,
        company_id: CompanyId,
    ) -> impl Future<Output = Result<Vec<PeriodLock>, RepositoryError>> + Send;

    /// Stores a new lock record.
    fn insert_period_lock(
        &self,
        lock: PeriodLock,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Sets the `locked` flag. Returns false if the record does not exist.
    fn set_period_locked(
        &self,
        id: PeriodLockId,
        locked: bool,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Returns the first locked record covering `date`, if any.
#[must_use]
pub fn first_covering_lock(locks: &[PeriodLock], date: NaiveDate) -> Option<&PeriodLock> {
    locks.iter().find(|lock| lock.covers(date))
}

/// Checks a date against a set of lock records.
///
/// # Errors
///
/// Returns `PeriodError::PeriodLocked` naming the covering period.
pub fn check_date(locks: &[PeriodLock], date: NaiveDate) -> Result<(), PeriodError> {
    match first_covering_lock(locks, date) {
        Some(lock) => Err(PeriodError::PeriodLocked {
            date,
            period_start: lock.period_start,
            period_end: lock.period_end,
        }),
        None => Ok(()),
    }
}

/// Period lock guard backed by a repository.
///
/// The guard itself has no side effects; it only answers whether a date is
/// closed. Callers on the write path must consult it before mutating.
pub struct PeriodLockGuard<R> {
    repo: Arc<R>,
}

impl<R: PeriodLockRepository> PeriodLockGuard<R> {
    /// Creates a guard over the given repository.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns true iff a locked record covers `date`.
    ///
    /// # Errors
    ///
    /// Fails only if the store fails.
    pub async fn is_locked(&self, company_id: CompanyId, date: NaiveDate) -> Result<bool, PeriodError> {
        let locks = self.repo.list_period_locks(company_id).await?;
        Ok(first_covering_lock(&locks, date).is_some())
    }

    /// Fails with `PeriodLocked` if `date` is inside a locked period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodLocked` or a repository error.
    pub async fn guard(&self, company_id: CompanyId, date: NaiveDate) -> Result<(), PeriodError> {
        let locks = self.repo.list_period_locks(company_id).await?;
        check_date(&locks, date)
    }

    /// Closes a period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` or a repository error.
    pub async fn lock_period(
        &self,
        company_id: CompanyId,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<PeriodLock, PeriodError> {
        let lock = PeriodLock::new(company_id, period_start, period_end)?;
        self.repo.insert_period_lock(lock.clone()).await?;
        info!(
            company_id = %company_id,
            period_start = %period_start,
            period_end = %period_end,
            "Period locked"
        );
        Ok(lock)
    }

    /// Re-opens or re-closes an existing lock record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a repository error.
    pub async fn set_locked(&self, id: PeriodLockId, locked: bool) -> Result<(), PeriodError> {
        if !self.repo.set_period_locked(id, locked).await? {
            return Err(PeriodError::NotFound(id));
        }
        info!(lock_id = %id, locked, "Period lock updated");
        Ok(())
    }
}
