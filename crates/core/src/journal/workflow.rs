//! Journal entry state transitions.
//!
//! `Draft -> Posted` is the only transition. Repositories apply it through
//! [`apply_post`] inside their atomic conditional update so that the state
//! rule lives in one place.

use chrono::{DateTime, Utc};
use ucto_shared::types::UserId;

use super::error::JournalError;
use super::types::{EntryStatus, JournalEntry};

/// Fails with `InvalidState` unless the entry is in `expected` status.
///
/// # Errors
///
/// Returns `JournalError::InvalidState`.
pub fn ensure_status(entry: &JournalEntry, expected: EntryStatus) -> Result<(), JournalError> {
    if entry.status == expected {
        Ok(())
    } else {
        Err(JournalError::InvalidState {
            id: entry.id,
            status: entry.status,
            expected,
        })
    }
}

/// Moves a draft entry to `Posted` and stamps who and when.
///
/// # Errors
///
/// Returns `InvalidState` if the entry is not a draft; the entry is left
/// untouched in that case.
pub fn apply_post(
    entry: &mut JournalEntry,
    posted_by: UserId,
    posted_at: DateTime<Utc>,
) -> Result<(), JournalError> {
    ensure_status(entry, EntryStatus::Draft)?;
    entry.status = EntryStatus::Posted;
    entry.posted_by = Some(posted_by);
    entry.posted_at = Some(posted_at);
    Ok(())
}
