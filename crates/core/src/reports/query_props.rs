//! Property-based tests for ledger queries.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use ucto_shared::types::CompanyId;

use super::query::{account_ledger, trial_balance};
use crate::accounts::{Account, AccountType, ChartOfAccounts};
use crate::journal::JournalEntry;
use crate::testing::{account, entry_on};

const CODES: [&str; 5] = ["211", "221", "321", "518", "602"];

fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// (day of year, debit account index, credit account index, amount, posted)
fn raw_entry() -> impl Strategy<Value = (u32, usize, usize, Decimal, bool)> {
    (1u32..=365, 0..CODES.len(), 0..CODES.len(), amount(), any::<bool>())
}

fn build(raw: &[(u32, usize, usize, Decimal, bool)]) -> (Vec<Account>, Vec<JournalEntry>) {
    let company = CompanyId::new();
    let accounts: Vec<Account> = CODES
        .iter()
        .map(|code| account(company, code, AccountType::Asset))
        .collect();
    let entries = raw
        .iter()
        .zip(1u64..)
        .map(|(&(day, debit, credit, amount, posted), sequence)| {
            let date = NaiveDate::from_yo_opt(2025, day).unwrap();
            entry_on(
                company,
                date,
                sequence,
                posted,
                &[
                    (accounts[debit].id, amount, Decimal::ZERO),
                    (accounts[credit].id, Decimal::ZERO, amount),
                ],
            )
        })
        .collect();
    (accounts, entries)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The trial balance of balanced posted entries always nets to zero.
    #[test]
    fn prop_trial_balance_nets_to_zero(
        raw in prop::collection::vec(raw_entry(), 0..40),
        as_of_day in 1u32..=365,
    ) {
        let (accounts, entries) = build(&raw);
        let chart = ChartOfAccounts::new(accounts).unwrap();
        let as_of = NaiveDate::from_yo_opt(2025, as_of_day).unwrap();

        let report = trial_balance(&chart, &entries, as_of, true);
        prop_assert_eq!(report.totals.balance, Decimal::ZERO);
        prop_assert!(report.totals.is_balanced);
    }

    /// closing - opening == total_debit - total_credit, and the last
    /// running balance equals the closing balance.
    #[test]
    fn prop_ledger_exactness(
        raw in prop::collection::vec(raw_entry(), 0..40),
        which in 0..CODES.len(),
        from_day in 1u32..=365,
        span in 0u32..120,
    ) {
        let (accounts, entries) = build(&raw);
        let from = NaiveDate::from_yo_opt(2025, from_day).unwrap();
        let to = NaiveDate::from_yo_opt(2025, (from_day + span).min(365)).unwrap();

        let ledger = account_ledger(&accounts[which], &entries, from, to).unwrap();
        prop_assert_eq!(
            ledger.closing_balance - ledger.opening_balance,
            ledger.total_debit - ledger.total_credit
        );
        if let Some(last) = ledger.rows.last() {
            prop_assert_eq!(last.running_balance, ledger.closing_balance);
        }
        prop_assert!(ledger.rows.windows(2).all(|w| w[0].date <= w[1].date));
    }

    /// Drafts never move a balance.
    #[test]
    fn prop_drafts_are_invisible(
        raw in prop::collection::vec(raw_entry(), 1..30),
    ) {
        let (accounts, entries) = build(&raw);
        let posted_only: Vec<JournalEntry> =
            entries.iter().filter(|e| e.is_posted()).cloned().collect();
        let chart = ChartOfAccounts::new(accounts).unwrap();
        let as_of = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();

        prop_assert_eq!(
            trial_balance(&chart, &entries, as_of, true),
            trial_balance(&chart, &posted_only, as_of, true)
        );
    }
}
