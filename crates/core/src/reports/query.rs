//! Ledger queries over journal entries.
//!
//! Every function here reads entries only through [`is_posted`]; drafts
//! never reach a balance.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;
use ucto_shared::types::{AccountId, Currency};

use super::balance::{AccountTotals, RunningBalance};
use super::error::ReportError;
use super::types::{AccountLedger, LedgerRow, TrialBalance, TrialBalanceRow, TrialBalanceTotals};
use crate::accounts::{Account, ChartOfAccounts};
use crate::journal::{EntryStatus, JournalEntry, JournalLine};

/// The single gate deciding whether an entry counts toward balances.
#[must_use]
pub fn is_posted(entry: &JournalEntry) -> bool {
    entry.status == EntryStatus::Posted
}

fn posted_lines(entries: &[JournalEntry]) -> impl Iterator<Item = (&JournalEntry, &JournalLine)> {
    entries
        .iter()
        .filter(|entry| is_posted(entry))
        .flat_map(|entry| entry.lines.iter().map(move |line| (entry, line)))
}

/// Builds the ledger of one account for `[date_from, date_to]`.
///
/// Rows are ordered by entry date, then entry creation sequence, then line
/// position.
///
/// # Errors
///
/// Returns `InvalidDateRange` if `date_from > date_to`.
pub fn account_ledger(
    account: &Account,
    entries: &[JournalEntry],
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<AccountLedger, ReportError> {
    if date_from > date_to {
        return Err(ReportError::InvalidDateRange {
            from: date_from,
            to: date_to,
        });
    }

    let mut opening = AccountTotals::default();
    let mut in_range: Vec<(&JournalEntry, &JournalLine)> = Vec::new();
    for (entry, line) in posted_lines(entries) {
        if line.account_id != account.id || entry.company_id != account.company_id {
            continue;
        }
        if entry.date < date_from {
            opening.add_line(line);
        } else if entry.date <= date_to {
            in_range.push((entry, line));
        }
    }
    in_range.sort_by(|(a, la), (b, lb)| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.sequence.cmp(&b.sequence))
            .then_with(|| la.position.cmp(&lb.position))
    });

    let opening_balance = opening.balance();
    let mut running = RunningBalance::opening(opening_balance);
    let mut totals = AccountTotals::default();
    let rows = in_range
        .into_iter()
        .map(|(entry, line)| {
            totals.add_line(line);
            LedgerRow {
                entry_id: entry.id,
                line_id: line.id,
                date: entry.date,
                document_type: entry.document_type,
                number: entry.number.clone(),
                description: line
                    .description
                    .clone()
                    .unwrap_or_else(|| entry.description.clone()),
                debit: line.debit(),
                credit: line.credit(),
                running_balance: running.apply(line.signed_amount()),
            }
        })
        .collect();

    Ok(AccountLedger {
        account_id: account.id,
        code: account.code.clone(),
        name: account.name.clone(),
        date_from,
        date_to,
        opening_balance,
        rows,
        total_debit: totals.debit,
        total_credit: totals.credit,
        closing_balance: opening_balance + totals.debit - totals.credit,
    })
}

/// Builds the trial balance of a chart as of `as_of` (inclusive).
///
/// Accounts without posted activity are left out unless
/// `include_zero_rows` is set. Lines on accounts missing from the chart are
/// skipped and logged.
#[must_use]
pub fn trial_balance(
    chart: &ChartOfAccounts,
    entries: &[JournalEntry],
    as_of: NaiveDate,
    include_zero_rows: bool,
) -> TrialBalance {
    let mut per_account: HashMap<AccountId, AccountTotals> = HashMap::new();
    for (entry, line) in posted_lines(entries) {
        if entry.date > as_of {
            continue;
        }
        if chart.get(line.account_id).is_none() {
            warn!(
                entry_id = %entry.id,
                account_id = %line.account_id,
                "Posted line references an account outside the chart; skipped"
            );
            continue;
        }
        per_account.entry(line.account_id).or_default().add_line(line);
    }

    let rows: Vec<TrialBalanceRow> = chart
        .iter()
        .filter_map(|account| {
            let totals = match per_account.get(&account.id) {
                Some(totals) => *totals,
                None if include_zero_rows => AccountTotals::default(),
                None => return None,
            };
            Some(TrialBalanceRow {
                account_id: account.id,
                code: account.code.clone(),
                name: account.name.clone(),
                account_type: account.account_type,
                total_debit: totals.debit,
                total_credit: totals.credit,
                balance: totals.balance(),
            })
        })
        .collect();

    let total_debit: Decimal = rows.iter().map(|r| r.total_debit).sum();
    let total_credit: Decimal = rows.iter().map(|r| r.total_credit).sum();
    let balance: Decimal = rows.iter().map(|r| r.balance).sum();

    TrialBalance {
        as_of,
        currency: Currency::default(),
        rows,
        totals: TrialBalanceTotals {
            total_debit,
            total_credit,
            balance,
            is_balanced: total_debit == total_credit,
        },
    }
}
