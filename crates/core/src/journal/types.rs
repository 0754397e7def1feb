//! Journal domain types.
//!
//! A journal entry (účtovný zápis) owns an ordered list of lines, each on
//! the debit (MD, "Má dať") or credit (D, "Dal") side of one account.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ucto_shared::types::{AccountId, CompanyId, Currency, JournalEntryId, JournalLineId, UserId};
use uuid::Uuid;

/// Side of a journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Debit (MD).
    Debit,
    /// Credit (D).
    Credit,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// Journal entry status.
///
/// `Draft -> Posted` is the whole state space; `Posted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Saved but not yet in the books; may be incomplete or unbalanced.
    Draft,
    /// In the books (immutable).
    Posted,
}

impl EntryStatus {
    /// Returns true if the entry can be modified.
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the entry is immutable.
    #[must_use]
    pub fn is_immutable(self) -> bool {
        matches!(self, Self::Posted)
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Posted => write!(f, "posted"),
        }
    }
}

/// Source document type of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Internal document (interný doklad).
    Internal,
    /// Issued invoice.
    IssuedInvoice,
    /// Received invoice.
    ReceivedInvoice,
    /// Bank statement.
    Bank,
    /// Cash voucher.
    Cash,
    /// Fixed asset document (depreciation, disposal).
    Asset,
    /// Anything else.
    Other,
}

/// One line of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique identifier.
    pub id: JournalLineId,
    /// Owning entry.
    pub entry_id: JournalEntryId,
    /// Position within the entry (creation order).
    pub position: u32,
    /// Account posted to.
    pub account_id: AccountId,
    /// Debit or credit.
    pub side: Side,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Currency of the amount.
    #[serde(default)]
    pub currency: Currency,
    /// Optional line text.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional cost center (stredisko).
    #[serde(default)]
    pub cost_center_id: Option<Uuid>,
    /// Optional project (zákazka).
    #[serde(default)]
    pub project_id: Option<Uuid>,
}

impl JournalLine {
    /// Debit amount (zero for credit lines).
    #[must_use]
    pub fn debit(&self) -> Decimal {
        match self.side {
            Side::Debit => self.amount,
            Side::Credit => Decimal::ZERO,
        }
    }

    /// Credit amount (zero for debit lines).
    #[must_use]
    pub fn credit(&self) -> Decimal {
        match self.side {
            Side::Debit => Decimal::ZERO,
            Side::Credit => self.amount,
        }
    }

    /// Signed amount: positive for debit, negative for credit.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit() - self.credit()
    }
}

/// A journal entry with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Company whose books this entry belongs to.
    pub company_id: CompanyId,
    /// Accounting date.
    pub date: NaiveDate,
    /// Source document type.
    pub document_type: DocumentType,
    /// Document number.
    pub number: String,
    /// Entry text.
    pub description: String,
    /// Current status.
    pub status: EntryStatus,
    /// Creation order assigned by the repository.
    #[serde(default)]
    pub sequence: u64,
    /// User who created the entry.
    pub created_by: UserId,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was posted.
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    /// User who posted the entry.
    #[serde(default)]
    pub posted_by: Option<UserId>,
    /// Entry this one reverses, if it is a correction.
    #[serde(default)]
    pub reverses: Option<JournalEntryId>,
    /// Lines in creation order.
    #[serde(default)]
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// Returns true if the entry is in the books.
    #[must_use]
    pub fn is_posted(&self) -> bool {
        self.status == EntryStatus::Posted
    }

    /// Debit and credit sums of the entry's lines.
    #[must_use]
    pub fn totals(&self) -> EntryTotals {
        EntryTotals::from_lines(&self.lines)
    }
}

/// Input for one line of a new draft.
#[derive(Debug, Clone)]
pub struct NewJournalLine {
    /// Account posted to.
    pub account_id: AccountId,
    /// Debit or credit.
    pub side: Side,
    /// Amount (must be non-negative with at most two decimals).
    pub amount: Decimal,
    /// Currency of the amount.
    pub currency: Currency,
    /// Optional line text.
    pub description: Option<String>,
    /// Optional cost center.
    pub cost_center_id: Option<Uuid>,
    /// Optional project.
    pub project_id: Option<Uuid>,
}

impl NewJournalLine {
    /// Convenience constructor for a plain EUR line.
    #[must_use]
    pub fn new(account_id: AccountId, side: Side, amount: Decimal) -> Self {
        Self {
            account_id,
            side,
            amount,
            currency: Currency::Eur,
            description: None,
            cost_center_id: None,
            project_id: None,
        }
    }
}

/// Input for creating a draft entry.
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    /// Company whose books this entry belongs to.
    pub company_id: CompanyId,
    /// Accounting date.
    pub date: NaiveDate,
    /// Source document type.
    pub document_type: DocumentType,
    /// Document number.
    pub number: String,
    /// Entry text.
    pub description: String,
    /// The lines; may be empty or unbalanced while drafting.
    pub lines: Vec<NewJournalLine>,
    /// The user creating the entry.
    pub created_by: UserId,
    /// Entry being reversed, for correction entries.
    pub reverses: Option<JournalEntryId>,
}

/// Debit and credit sums of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryTotals {
    /// Sum of debit lines.
    pub debit: Decimal,
    /// Sum of credit lines.
    pub credit: Decimal,
}

impl EntryTotals {
    /// Sums the given lines.
    #[must_use]
    pub fn from_lines(lines: &[JournalLine]) -> Self {
        lines.iter().fold(
            Self {
                debit: Decimal::ZERO,
                credit: Decimal::ZERO,
            },
            |acc, line| Self {
                debit: acc.debit + line.debit(),
                credit: acc.credit + line.credit(),
            },
        )
    }

    /// Debit minus credit.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Returns true if the sides agree within `tolerance`.
    #[must_use]
    pub fn is_balanced_within(&self, tolerance: Decimal) -> bool {
        self.difference().abs() <= tolerance
    }
}
