//! JSON company snapshots.
//!
//! A snapshot is a plain dump of every table. Loading one goes through the
//! same uniqueness checks as the repository writes, and rejects account
//! codes, posted entries and period locks that the services would never
//! have stored.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use ucto_core::RepositoryError;
use ucto_core::accounts::{Account, AccountError};
use ucto_core::depreciation::{Asset, AssetDepreciation};
use ucto_core::journal::{BALANCE_TOLERANCE, JournalEntry, JournalError, validate_for_posting};
use ucto_core::period::{PeriodError, PeriodLock};
use ucto_core::tax::{Contact, Invoice};
use ucto_shared::types::{AccountId, JournalEntryId, PeriodLockId};

use crate::memory::{MemoryStore, Tables};

/// Errors raised while loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The file could not be read.
    #[error("Cannot read snapshot {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The content is not a valid snapshot.
    #[error("Invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// Two records collide on a unique key.
    #[error(transparent)]
    Conflict(#[from] RepositoryError),

    /// An account carries a malformed code.
    #[error("Invalid account {account_id}: {source}")]
    InvalidAccount {
        /// The account.
        account_id: AccountId,
        /// Code validation failure.
        #[source]
        source: AccountError,
    },

    /// A posted entry is empty or unbalanced.
    #[error("Invalid posted entry {entry_id}: {source}")]
    InvalidEntry {
        /// The entry.
        entry_id: JournalEntryId,
        /// Posting rule failure.
        #[source]
        source: JournalError,
    },

    /// A period lock ends before it starts.
    #[error("Invalid period lock {lock_id}: {source}")]
    InvalidPeriodLock {
        /// The lock.
        lock_id: PeriodLockId,
        /// Range failure.
        #[source]
        source: PeriodError,
    },
}

fn check_account(account: &Account) -> Result<(), SnapshotError> {
    account
        .code
        .validate()
        .map_err(|source| SnapshotError::InvalidAccount {
            account_id: account.id,
            source,
        })
}

fn check_entry(entry: &JournalEntry) -> Result<(), SnapshotError> {
    if !entry.is_posted() {
        return Ok(());
    }
    validate_for_posting(&entry.lines, BALANCE_TOLERANCE)
        .map(|_| ())
        .map_err(|source| SnapshotError::InvalidEntry {
            entry_id: entry.id,
            source,
        })
}

fn check_lock(lock: &PeriodLock) -> Result<(), SnapshotError> {
    if lock.period_start > lock.period_end {
        return Err(SnapshotError::InvalidPeriodLock {
            lock_id: lock.id,
            source: PeriodError::InvalidRange {
                start: lock.period_start,
                end: lock.period_end,
            },
        });
    }
    Ok(())
}

/// Every table of the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Chart of accounts of all companies.
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Journal entries with their lines.
    #[serde(default)]
    pub entries: Vec<JournalEntry>,
    /// Period lock records.
    #[serde(default)]
    pub period_locks: Vec<PeriodLock>,
    /// Fixed assets.
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// Recorded depreciation years.
    #[serde(default)]
    pub depreciations: Vec<AssetDepreciation>,
    /// Invoices with their lines.
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    /// Business partners.
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl MemoryStore {
    /// Builds a store from a snapshot.
    ///
    /// Entries without a sequence get one in snapshot order.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` for a duplicate account code, entry id or
    /// depreciation year, `InvalidAccount` for a malformed code,
    /// `InvalidEntry` for an empty or unbalanced posted entry and
    /// `InvalidPeriodLock` for an inverted lock range.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        let mut tables = Tables::default();
        for account in snapshot.accounts {
            check_account(&account)?;
            tables.add_account(account)?;
        }
        for entry in snapshot.entries {
            check_entry(&entry)?;
            tables.add_entry(entry)?;
        }
        for record in snapshot.depreciations {
            tables.add_depreciation(record)?;
        }
        for lock in &snapshot.period_locks {
            check_lock(lock)?;
        }
        tables.locks = snapshot.period_locks.into_iter().map(|l| (l.id, l)).collect();
        tables.assets = snapshot.assets.into_iter().map(|a| (a.id, a)).collect();
        tables.invoices = snapshot.invoices.into_iter().map(|i| (i.id, i)).collect();
        tables.contacts = snapshot.contacts.into_iter().map(|c| (c.id, c)).collect();

        info!(
            accounts = tables.accounts.len(),
            entries = tables.entries.len(),
            assets = tables.assets.len(),
            invoices = tables.invoices.len(),
            "Snapshot loaded"
        );
        Ok(Self::from_tables(tables))
    }

    /// Parses a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns `Json` for malformed input, otherwise any error of
    /// [`MemoryStore::from_snapshot`].
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        Self::from_snapshot(serde_json::from_str(json)?)
    }

    /// Reads a JSON snapshot file.
    ///
    /// # Errors
    ///
    /// Returns `Io`, or any error of [`MemoryStore::from_json_str`].
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Dumps every table, entries in sequence order.
    pub async fn snapshot(&self) -> Snapshot {
        let tables = self.tables.read().await;
        let mut entries: Vec<_> = tables.entries.values().cloned().collect();
        entries.sort_by_key(|entry| entry.sequence);
        Snapshot {
            accounts: tables.accounts.values().cloned().collect(),
            entries,
            period_locks: tables.locks.values().cloned().collect(),
            assets: tables.assets.values().cloned().collect(),
            depreciations: tables.depreciations.values().cloned().collect(),
            invoices: tables.invoices.values().cloned().collect(),
            contacts: tables.contacts.values().cloned().collect(),
        }
    }
}
