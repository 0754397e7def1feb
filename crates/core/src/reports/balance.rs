//! Account balance accumulation.

use rust_decimal::Decimal;

use crate::journal::JournalLine;

/// Debit and credit turnover of one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountTotals {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
}

impl AccountTotals {
    /// Adds a line's amount to the matching side.
    pub fn add_line(&mut self, line: &JournalLine) {
        self.debit += line.debit();
        self.credit += line.credit();
    }

    /// Debit minus credit.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// Running balance over an ordered sequence of lines.
///
/// `current_balance` after each step equals the previous balance plus the
/// step's signed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningBalance {
    /// Number of lines applied.
    pub count: u64,
    /// Balance before the latest line.
    pub previous_balance: Decimal,
    /// Balance after the latest line.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// Starts from an opening balance.
    #[must_use]
    pub fn opening(balance: Decimal) -> Self {
        Self {
            count: 0,
            previous_balance: balance,
            current_balance: balance,
        }
    }

    /// Applies a signed change and returns the new balance.
    pub fn apply(&mut self, change: Decimal) -> Decimal {
        self.count += 1;
        self.previous_balance = self.current_balance;
        self.current_balance += change;
        self.current_balance
    }
}
