//! Chart of accounts.
//!
//! Account codes, the per-company registry enforcing code uniqueness and
//! the service maintaining accounts through `AccountRepository`.

pub mod chart;
pub mod error;
pub mod service;
pub mod types;

pub use chart::ChartOfAccounts;
pub use error::AccountError;
pub use service::{AccountRepository, AccountService};
pub use types::{Account, AccountCode, AccountType, NewAccount};
