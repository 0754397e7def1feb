//! Period lock guard.
//!
//! A locked period closes a date range of a company's books to posting.

pub mod error;
pub mod guard;
pub mod types;

pub use error::PeriodError;
pub use guard::{PeriodLockGuard, PeriodLockRepository, check_date, first_covering_lock};
pub use types::PeriodLock;
