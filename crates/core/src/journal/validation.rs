//! Business rule validation for journal entries.
//!
//! Draft validation checks line shape only. The balance rule applies at
//! posting time.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use ucto_shared::types::MONEY_SCALE;

use super::error::JournalError;
use super::types::{EntryTotals, JournalLine, NewJournalLine};

/// Maximum absolute difference between debit and credit sums at posting.
pub const BALANCE_TOLERANCE: Decimal = dec!(0.005);

/// Validates the lines of a new draft.
///
/// # Errors
///
/// Returns `JournalError::Validation` for a negative amount or an amount
/// with more than two decimal places.
pub fn validate_new_lines(lines: &[NewJournalLine]) -> Result<(), JournalError> {
    for (position, line) in lines.iter().enumerate() {
        if line.amount.is_sign_negative() && !line.amount.is_zero() {
            return Err(JournalError::Validation(format!(
                "line {}: amount must not be negative",
                position + 1
            )));
        }
        if line.amount.normalize().scale() > MONEY_SCALE {
            return Err(JournalError::Validation(format!(
                "line {}: amount {} has more than {MONEY_SCALE} decimal places",
                position + 1,
                line.amount
            )));
        }
    }
    Ok(())
}

/// Validates an entry's lines for posting.
///
/// Checks emptiness first, then the balance rule.
///
/// # Errors
///
/// Returns `EmptyEntry` or `UnbalancedEntry`.
pub fn validate_for_posting(
    lines: &[JournalLine],
    tolerance: Decimal,
) -> Result<EntryTotals, JournalError> {
    if lines.is_empty() {
        return Err(JournalError::EmptyEntry);
    }

    let totals = EntryTotals::from_lines(lines);
    if !totals.is_balanced_within(tolerance) {
        return Err(JournalError::UnbalancedEntry {
            debit: totals.debit,
            credit: totals.credit,
        });
    }

    Ok(totals)
}
