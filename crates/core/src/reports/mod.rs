//! Account ledger and trial balance.
//!
//! Pure query functions over journal entries plus a service that loads them
//! through the repositories.

pub mod balance;
pub mod error;
pub mod query;
pub mod service;
pub mod types;

#[cfg(test)]
mod query_props;

pub use balance::{AccountTotals, RunningBalance};
pub use error::ReportError;
pub use query::{account_ledger, is_posted, trial_balance};
pub use service::LedgerQueryService;
pub use types::{AccountLedger, LedgerRow, TrialBalance, TrialBalanceRow, TrialBalanceTotals};
