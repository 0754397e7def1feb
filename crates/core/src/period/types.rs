//! Period lock records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ucto_shared::types::{CompanyId, PeriodLockId};

use super::error::PeriodError;

/// A closed (or re-opened) accounting period of one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodLock {
    /// Unique identifier.
    pub id: PeriodLockId,
    /// Company whose books are closed.
    pub company_id: CompanyId,
    /// First day of the period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub period_end: NaiveDate,
    /// Only locked records close the period.
    pub locked: bool,
}

impl PeriodLock {
    /// Creates a locked period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidRange` if `period_start > period_end`.
    pub fn new(
        company_id: CompanyId,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Self, PeriodError> {
        if period_start > period_end {
            return Err(PeriodError::InvalidRange {
                start: period_start,
                end: period_end,
            });
        }
        Ok(Self {
            id: PeriodLockId::new(),
            company_id,
            period_start,
            period_end,
            locked: true,
        })
    }

    /// Returns true if this record is locked and its range includes `date`.
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.locked && self.period_start <= date && date <= self.period_end
    }
}
