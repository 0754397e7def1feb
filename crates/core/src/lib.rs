//! Ledger and fiscal computation core for Ucto.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached through the repository traits each module declares;
//! `ucto-store` provides the in-memory implementation.
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts (synthetic/analytic codes, account classes)
//! - `period` - Period lock guard
//! - `journal` - Double-entry journal and the posting state machine
//! - `reports` - Account ledger and trial balance over posted entries
//! - `depreciation` - Statutory fixed-asset depreciation schedules
//! - `tax` - VAT return, control statement and EU summary statement

pub mod accounts;
pub mod depreciation;
pub mod journal;
pub mod period;
pub mod reports;
pub mod repository;
pub mod tax;

#[cfg(test)]
pub(crate) mod testing;

pub use repository::RepositoryError;
