//! Property-based tests for journal posting validation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use ucto_shared::types::{AccountId, Currency, JournalEntryId, JournalLineId};

use super::error::JournalError;
use super::types::{JournalLine, NewJournalLine, Side};
use super::validation::{BALANCE_TOLERANCE, validate_for_posting, validate_new_lines};

/// Strategy to generate a cent amount from 0.01 to 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Debit), Just(Side::Credit)]
}

fn make_line(side: Side, amount: Decimal) -> JournalLine {
    JournalLine {
        id: JournalLineId::new(),
        entry_id: JournalEntryId::new(),
        position: 0,
        account_id: AccountId::new(),
        side,
        amount,
        currency: Currency::Eur,
        description: None,
        cost_center_id: None,
        project_id: None,
    }
}

/// Builds a balanced entry: each amount appears once on the debit side and
/// once on the credit side.
fn balanced_lines(amounts: &[Decimal]) -> Vec<JournalLine> {
    amounts
        .iter()
        .flat_map(|amount| {
            [
                make_line(Side::Debit, *amount),
                make_line(Side::Credit, *amount),
            ]
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any entry whose sides agree posts, and the reported totals are equal.
    #[test]
    fn prop_balanced_entries_accepted(
        amounts in prop::collection::vec(positive_amount(), 1..8),
    ) {
        let lines = balanced_lines(&amounts);
        let totals = validate_for_posting(&lines, BALANCE_TOLERANCE);
        prop_assert!(totals.is_ok(), "balanced entry rejected: {:?}", totals);
        let totals = totals.unwrap();
        prop_assert_eq!(totals.debit, totals.credit);
    }

    /// Any cent-level imbalance is rejected with the actual sums.
    #[test]
    fn prop_cent_imbalance_rejected(
        amounts in prop::collection::vec(positive_amount(), 1..8),
        extra in positive_amount(),
        side in side_strategy(),
    ) {
        let mut lines = balanced_lines(&amounts);
        lines.push(make_line(side, extra));

        let result = validate_for_posting(&lines, BALANCE_TOLERANCE);
        let matched = matches!(
            result,
            Err(JournalError::UnbalancedEntry { debit, credit }) if (debit - credit).abs() == extra
        );
        prop_assert!(matched, "expected imbalance of {}, got {:?}", extra, result);
    }

    /// Negative amounts never reach the store.
    #[test]
    fn prop_negative_amounts_rejected(
        cents in 1i64..100_000_000i64,
        side in side_strategy(),
    ) {
        let lines = vec![NewJournalLine::new(AccountId::new(), side, Decimal::new(-cents, 2))];
        prop_assert!(matches!(validate_new_lines(&lines), Err(JournalError::Validation(_))));
    }

    /// Cent amounts always pass draft validation.
    #[test]
    fn prop_cent_amounts_accepted(
        amounts in prop::collection::vec(positive_amount(), 0..8),
        side in side_strategy(),
    ) {
        let lines: Vec<NewJournalLine> = amounts
            .iter()
            .map(|amount| NewJournalLine::new(AccountId::new(), side, *amount))
            .collect();
        prop_assert!(validate_new_lines(&lines).is_ok());
    }
}
