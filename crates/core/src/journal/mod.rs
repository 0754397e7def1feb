//! Double-entry journal.
//!
//! Entries are saved as drafts and posted once. Posting enforces the
//! balance rule and the period lock; a posted entry is never changed and is
//! corrected only by a reversing entry.

pub mod error;
pub mod reversal;
pub mod service;
pub mod types;
pub mod validation;
pub mod workflow;

#[cfg(test)]
mod validation_props;

pub use error::JournalError;
pub use reversal::build_reversal;
pub use service::{JournalRepository, JournalService};
pub use types::{
    DocumentType, EntryStatus, EntryTotals, JournalEntry, JournalLine, NewJournalEntry,
    NewJournalLine, Side,
};
pub use validation::{BALANCE_TOLERANCE, validate_for_posting, validate_new_lines};
pub use workflow::{apply_post, ensure_status};
