//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ucto_shared::types::{AccountId, Currency, JournalEntryId, JournalLineId};

use crate::accounts::{AccountCode, AccountType};
use crate::journal::DocumentType;

/// One posted line in an account ledger (hlavná kniha).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Entry the line belongs to.
    pub entry_id: JournalEntryId,
    /// The line.
    pub line_id: JournalLineId,
    /// Entry date.
    pub date: NaiveDate,
    /// Source document type.
    pub document_type: DocumentType,
    /// Document number.
    pub number: String,
    /// Line text, falling back to the entry text.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Balance (debit minus credit) after this row.
    pub running_balance: Decimal,
}

/// Activity of one account over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLedger {
    /// The account.
    pub account_id: AccountId,
    /// Account code.
    pub code: AccountCode,
    /// Account name.
    pub name: String,
    /// First day of the range.
    pub date_from: NaiveDate,
    /// Last day of the range.
    pub date_to: NaiveDate,
    /// Balance of posted lines dated before `date_from`.
    pub opening_balance: Decimal,
    /// Posted lines in the range, by date then creation order.
    pub rows: Vec<LedgerRow>,
    /// Sum of debits in the range.
    pub total_debit: Decimal,
    /// Sum of credits in the range.
    pub total_credit: Decimal,
    /// `opening_balance + total_debit - total_credit`.
    pub closing_balance: Decimal,
}

/// One account in the trial balance (obratová predvaha).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// The account.
    pub account_id: AccountId,
    /// Account code.
    pub code: AccountCode,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Total debits up to the report date.
    pub total_debit: Decimal,
    /// Total credits up to the report date.
    pub total_credit: Decimal,
    /// `total_debit - total_credit`.
    pub balance: Decimal,
}

impl TrialBalanceRow {
    /// Balance in the account's natural direction (credit-normal accounts
    /// report credit minus debit).
    #[must_use]
    pub fn natural_balance(&self) -> Decimal {
        if self.account_type.is_debit_normal() {
            self.balance
        } else {
            -self.balance
        }
    }
}

/// Trial balance totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
    /// Sum of row balances; zero for consistent books.
    pub balance: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    /// Report date (inclusive).
    pub as_of: NaiveDate,
    /// Reporting currency.
    pub currency: Currency,
    /// Rows in account code order.
    pub rows: Vec<TrialBalanceRow>,
    /// Totals.
    pub totals: TrialBalanceTotals,
}
