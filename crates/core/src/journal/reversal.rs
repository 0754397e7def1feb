//! Correction entries for posted journal entries.
//!
//! A posted entry is never changed. It is corrected by a new entry with the
//! same lines on swapped sides that points back at the original.

use chrono::NaiveDate;
use ucto_shared::types::UserId;

use super::error::JournalError;
use super::types::{EntryStatus, JournalEntry, NewJournalEntry, NewJournalLine};
use super::workflow::ensure_status;

/// Builds the draft input that reverses a posted entry.
///
/// Amounts, accounts, currencies and analytic dimensions are kept; each
/// line moves to the opposite side.
///
/// # Errors
///
/// Returns `InvalidState` if the original is not posted.
pub fn build_reversal(
    original: &JournalEntry,
    date: NaiveDate,
    created_by: UserId,
) -> Result<NewJournalEntry, JournalError> {
    ensure_status(original, EntryStatus::Posted)?;

    let lines = original
        .lines
        .iter()
        .map(|line| NewJournalLine {
            account_id: line.account_id,
            side: line.side.opposite(),
            amount: line.amount,
            currency: line.currency,
            description: Some(format!(
                "Reversal: {}",
                line.description.clone().unwrap_or_default()
            )),
            cost_center_id: line.cost_center_id,
            project_id: line.project_id,
        })
        .collect();

    Ok(NewJournalEntry {
        company_id: original.company_id,
        date,
        document_type: original.document_type,
        number: format!("{}-R", original.number),
        description: format!("Reversal of {}", original.number),
        lines,
        created_by,
        reverses: Some(original.id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::types::{DocumentType, EntryTotals, JournalLine, Side};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use ucto_shared::types::{AccountId, CompanyId, Currency, JournalEntryId, JournalLineId};

    fn posted(lines: &[(Side, Decimal)]) -> JournalEntry {
        let id = JournalEntryId::new();
        JournalEntry {
            id,
            company_id: CompanyId::new(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            document_type: DocumentType::ReceivedInvoice,
            number: "FP-2025-014".into(),
            description: "Office supplies".into(),
            status: EntryStatus::Posted,
            sequence: 7,
            created_by: UserId::new(),
            created_at: Utc::now(),
            posted_at: Some(Utc::now()),
            posted_by: Some(UserId::new()),
            reverses: None,
            lines: lines
                .iter()
                .enumerate()
                .map(|(i, (side, amount))| JournalLine {
                    id: JournalLineId::new(),
                    entry_id: id,
                    position: u32::try_from(i).unwrap(),
                    account_id: AccountId::new(),
                    side: *side,
                    amount: *amount,
                    currency: Currency::Eur,
                    description: Some("Paper".into()),
                    cost_center_id: None,
                    project_id: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_reversal_swaps_sides_and_keeps_amounts() {
        let original = posted(&[
            (Side::Debit, dec!(100.00)),
            (Side::Debit, dec!(20.00)),
            (Side::Credit, dec!(120.00)),
        ]);
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let reversal = build_reversal(&original, date, UserId::new()).unwrap();

        assert_eq!(reversal.reverses, Some(original.id));
        assert_eq!(reversal.date, date);
        assert_eq!(reversal.number, "FP-2025-014-R");
        assert_eq!(reversal.lines.len(), 3);
        for (new, old) in reversal.lines.iter().zip(&original.lines) {
            assert_eq!(new.account_id, old.account_id);
            assert_eq!(new.amount, old.amount);
            assert_eq!(new.side, old.side.opposite());
        }
        assert!(
            reversal.lines[0]
                .description
                .as_deref()
                .unwrap()
                .starts_with("Reversal: ")
        );
    }

    #[test]
    fn test_reversal_nets_to_zero_per_account() {
        let original = posted(&[(Side::Debit, dec!(55.55)), (Side::Credit, dec!(55.55))]);
        let reversal =
            build_reversal(&original, original.date, UserId::new()).unwrap();

        let original_totals = EntryTotals::from_lines(&original.lines);
        let reversed_debit: Decimal = reversal
            .lines
            .iter()
            .filter(|l| l.side == Side::Debit)
            .map(|l| l.amount)
            .sum();
        assert_eq!(reversed_debit, original_totals.credit);
    }

    #[test]
    fn test_draft_cannot_be_reversed() {
        let mut original = posted(&[(Side::Debit, dec!(1.00)), (Side::Credit, dec!(1.00))]);
        original.status = EntryStatus::Draft;
        assert!(matches!(
            build_reversal(&original, original.date, UserId::new()),
            Err(JournalError::InvalidState { .. })
        ));
    }
}
