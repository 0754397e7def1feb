//! Invoice, contact and tax period types consumed by the VAT engine.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ucto_shared::types::{CompanyId, ContactId, InvoiceId, InvoiceItemId};

use super::error::TaxError;

/// Direction of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceKind {
    /// Sales invoice (odberateľská faktúra).
    Issued,
    /// Purchase invoice (dodávateľská faktúra).
    Received,
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Not yet issued.
    Draft,
    /// Issued and unpaid.
    Issued,
    /// Paid.
    Paid,
    /// Cancelled.
    Cancelled,
}

impl InvoiceStatus {
    /// Returns true if invoices in this status enter VAT figures.
    #[must_use]
    pub fn is_reportable(self) -> bool {
        matches!(self, Self::Issued | Self::Paid)
    }
}

/// VAT regime of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatTreatment {
    /// Domestic supply with VAT charged by the supplier.
    #[default]
    Standard,
    /// Domestic reverse charge (prenesenie daňovej povinnosti).
    DomesticReverseCharge,
    /// Intra-community supply or acquisition.
    IntraCommunity,
    /// Export or import outside the EU.
    ThirdCountry,
    /// Exempt supply.
    Exempt,
}

impl VatTreatment {
    /// Returns true if the customer self-assesses VAT on a received invoice.
    #[must_use]
    pub fn is_self_assessed(self) -> bool {
        matches!(
            self,
            Self::DomesticReverseCharge | Self::IntraCommunity | Self::ThirdCountry
        )
    }
}

/// Whether a line supplies goods or services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyKind {
    /// Goods.
    #[default]
    Goods,
    /// Services.
    Services,
}

/// One invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Unique identifier.
    pub id: InvoiceItemId,
    /// Line text.
    #[serde(default)]
    pub description: String,
    /// Net amount.
    pub base: Decimal,
    /// VAT rate in percent.
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    /// VAT charged on the line.
    #[serde(default)]
    pub vat_amount: Decimal,
    /// Goods or services.
    #[serde(default)]
    pub supply: SupplyKind,
    /// Customs commodity code for domestic reverse charge goods.
    #[serde(default)]
    pub commodity_code: Option<String>,
}

/// An invoice with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier.
    pub id: InvoiceId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Invoice number.
    pub number: String,
    /// Issued or received.
    pub kind: InvoiceKind,
    /// True for a credit note (dobropis).
    #[serde(default)]
    pub is_credit_note: bool,
    /// Number of the invoice a credit note corrects.
    #[serde(default)]
    pub original_number: Option<String>,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Delivery date, if it differs from the issue date.
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    /// Counterparty.
    #[serde(default)]
    pub contact_id: Option<ContactId>,
    /// Lifecycle status.
    pub status: InvoiceStatus,
    /// VAT regime.
    #[serde(default)]
    pub vat_treatment: VatTreatment,
    /// Simplified invoice (zjednodušená faktúra).
    #[serde(default)]
    pub is_simplified: bool,
    /// Cash register receipt (pokladničný doklad).
    #[serde(default)]
    pub is_cash_register: bool,
    /// Lines.
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
}

impl Invoice {
    /// Date the VAT liability arises: the delivery date, else the issue date.
    #[must_use]
    pub fn tax_point(&self) -> NaiveDate {
        self.delivery_date.unwrap_or(self.issue_date)
    }

    /// `-1` for credit notes, `1` otherwise.
    #[must_use]
    pub fn sign(&self) -> Decimal {
        if self.is_credit_note {
            Decimal::NEGATIVE_ONE
        } else {
            Decimal::ONE
        }
    }
}

/// A business partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique identifier.
    pub id: ContactId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Name.
    pub name: String,
    /// ISO 3166 alpha-2 country code.
    pub country: String,
    /// Company registration number (IČO).
    #[serde(default)]
    pub ico: Option<String>,
    /// Tax id (DIČ).
    #[serde(default)]
    pub dic: Option<String>,
    /// VAT id (IČ DPH).
    #[serde(default)]
    pub ic_dph: Option<String>,
    /// Registered for VAT.
    #[serde(default)]
    pub is_vat_payer: bool,
}

impl Contact {
    /// The VAT id, if present and non-blank.
    #[must_use]
    pub fn vat_id(&self) -> Option<&str> {
        self.ic_dph
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Returns true if the contact is in `country` (case-insensitive).
    #[must_use]
    pub fn is_in(&self, country: &str) -> bool {
        self.country.eq_ignore_ascii_case(country)
    }
}

/// A VAT reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxPeriod {
    /// First day.
    pub from: NaiveDate,
    /// Last day.
    pub to: NaiveDate,
    /// Country of the VAT registration.
    pub home_country: String,
}

impl TaxPeriod {
    /// Creates a period registered in Slovakia.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` if `from > to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, TaxError> {
        if from > to {
            return Err(TaxError::InvalidPeriod { from, to });
        }
        Ok(Self {
            from,
            to,
            home_country: "SK".to_string(),
        })
    }

    /// A calendar month.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonth` for an impossible month.
    pub fn month(year: i32, month: u32) -> Result<Self, TaxError> {
        let invalid = || TaxError::InvalidMonth { year, month };
        let from = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;
        let to = next.pred_opt().ok_or_else(invalid)?;
        Self::new(from, to)
    }

    /// A calendar quarter (1 to 4).
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonth` for a quarter outside 1 to 4.
    pub fn quarter(year: i32, quarter: u32) -> Result<Self, TaxError> {
        if !(1..=4).contains(&quarter) {
            return Err(TaxError::InvalidMonth {
                year,
                month: quarter.saturating_mul(3),
            });
        }
        let first = Self::month(year, quarter * 3 - 2)?;
        let last = Self::month(year, quarter * 3)?;
        Self::new(first.from, last.to)
    }

    /// Replaces the home country.
    #[must_use]
    pub fn with_home_country(mut self, country: impl Into<String>) -> Self {
        self.home_country = country.into();
        self
    }

    /// Returns true if the invoice enters this period's figures: reportable
    /// status and issue date inside the period.
    #[must_use]
    pub fn includes(&self, invoice: &Invoice) -> bool {
        invoice.status.is_reportable()
            && invoice.issue_date >= self.from
            && invoice.issue_date <= self.to
    }

    /// Year of the period start.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.from.year()
    }
}

/// Why a line was left out of the figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum WarningReason {
    /// The invoice has no contact or the contact is unknown.
    MissingCounterparty,
    /// The counterparty has no VAT id.
    MissingVatId,
    /// The line's rate is not a statutory rate at the tax point.
    UnknownVatRate {
        /// The line's rate.
        rate: Option<Decimal>,
        /// The tax point.
        tax_point: NaiveDate,
    },
    /// The counterparty is outside the EU.
    NonEuCounterparty {
        /// Its country.
        country: String,
    },
}

impl std::fmt::Display for WarningReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCounterparty => write!(f, "counterparty missing"),
            Self::MissingVatId => write!(f, "counterparty has no VAT id"),
            Self::UnknownVatRate {
                rate: Some(rate),
                tax_point,
            } => write!(f, "rate {rate}% is not a statutory rate on {tax_point}"),
            Self::UnknownVatRate {
                rate: None,
                tax_point,
            } => write!(f, "line has no VAT rate (tax point {tax_point})"),
            Self::NonEuCounterparty { country } => {
                write!(f, "counterparty country {country} is outside the EU")
            }
        }
    }
}

/// A line left out of VAT figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxWarning {
    /// Invoice number.
    pub invoice_number: String,
    /// The line, or `None` when the whole invoice was skipped.
    pub item_id: Option<InvoiceItemId>,
    /// Reason.
    pub reason: WarningReason,
}
