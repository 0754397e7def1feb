//! Chart of accounts domain types.
//!
//! Slovak charts of accounts use a three digit synthetic code whose first
//! digit is the account class, optionally refined by an analytic sub-code
//! (written `321.100`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ucto_shared::types::{AccountId, CompanyId};

use super::error::AccountError;

/// Account type used for statement placement and balance sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Assets (debit-normal).
    Asset,
    /// Liabilities and equity (credit-normal).
    Liability,
    /// Revenues (credit-normal).
    Revenue,
    /// Expenses (debit-normal).
    Expense,
}

impl AccountType {
    /// Returns true if the account normally carries a debit balance.
    #[must_use]
    pub fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }

    /// Suggests the account type for a Slovak account class (0-9).
    ///
    /// Classes 0-4 are balance sheet accounts, 5 expenses, 6 revenues.
    /// Class 3 mixes receivables and payables, so it defaults to asset.
    /// Closing and internal classes (7-9) have no natural type.
    #[must_use]
    pub fn default_for_class(class: u8) -> Option<Self> {
        match class {
            0..=3 => Some(Self::Asset),
            4 => Some(Self::Liability),
            5 => Some(Self::Expense),
            6 => Some(Self::Revenue),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset => write!(f, "asset"),
            Self::Liability => write!(f, "liability"),
            Self::Revenue => write!(f, "revenue"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// Account code: synthetic part plus optional analytic refinement.
///
/// Ordering is by synthetic code first, with the bare synthetic account
/// sorting before its analytic children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountCode {
    /// Three digit synthetic code (e.g. `321`).
    #[serde(rename = "synthetic_code")]
    pub synthetic: String,
    /// Optional analytic sub-code (e.g. `100`).
    #[serde(rename = "analytic_code", default)]
    pub analytic: Option<String>,
}

impl AccountCode {
    /// Builds and validates an account code.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidCode` when the synthetic part is not
    /// exactly three ASCII digits or the analytic part is blank or contains
    /// whitespace.
    pub fn new(synthetic: impl Into<String>, analytic: Option<String>) -> Result<Self, AccountError> {
        let code = Self {
            synthetic: synthetic.into(),
            analytic,
        };
        code.validate()?;
        Ok(code)
    }

    /// Parses `321` or `321.100`.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidCode` for malformed input.
    pub fn parse(raw: &str) -> Result<Self, AccountError> {
        let raw = raw.trim();
        match raw.split_once('.') {
            Some((synthetic, analytic)) => Self::new(synthetic, Some(analytic.to_string())),
            None => Self::new(raw, None),
        }
    }

    /// Checks the code shape.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidCode` for malformed codes.
    pub fn validate(&self) -> Result<(), AccountError> {
        if self.synthetic.len() != 3 || !self.synthetic.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AccountError::InvalidCode(self.to_string()));
        }
        if let Some(analytic) = &self.analytic
            && (analytic.is_empty() || analytic.chars().any(char::is_whitespace))
        {
            return Err(AccountError::InvalidCode(self.to_string()));
        }
        Ok(())
    }

    /// Account class: the first synthetic digit.
    #[must_use]
    pub fn class(&self) -> u8 {
        self.synthetic
            .bytes()
            .next()
            .map_or(0, |b| b.saturating_sub(b'0'))
    }

    /// Returns true if this code is the synthetic parent of `other`.
    #[must_use]
    pub fn is_parent_of(&self, other: &Self) -> bool {
        self.analytic.is_none() && other.analytic.is_some() && self.synthetic == other.synthetic
    }
}

impl fmt::Display for AccountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.analytic {
            Some(analytic) => write!(f, "{}.{}", self.synthetic, analytic),
            None => write!(f, "{}", self.synthetic),
        }
    }
}

impl FromStr for AccountCode {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// An account in a company's chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Company owning the account.
    pub company_id: CompanyId,
    /// Synthetic and analytic code.
    #[serde(flatten)]
    pub code: AccountCode,
    /// Display name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Whether postings affect the tax base.
    #[serde(default)]
    pub tax_relevant: bool,
    /// Inactive accounts reject new postings.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Company owning the account.
    pub company_id: CompanyId,
    /// Synthetic and analytic code.
    pub code: AccountCode,
    /// Display name.
    pub name: String,
    /// Account type; defaults from the account class when `None`.
    pub account_type: Option<AccountType>,
    /// Whether postings affect the tax base.
    pub tax_relevant: bool,
}
