//! Slovak VAT computations.
//!
//! Pure functions compute the periodic return (DPH), the control statement
//! (KV DPH) and the EU summary statement (SV) from invoices and contacts.
//! They never fail on data shape: a line that cannot be reported is left out
//! and listed in the result's `warnings`.

pub mod dph;
pub mod error;
pub mod kv_dph;
mod lookup;
pub mod rates;
pub mod service;
pub mod sv;
pub mod types;

pub use dph::{PeriodicReturn, RateBucket, RateBuckets, calculate_dph};
pub use error::TaxError;
pub use kv_dph::{
    ControlStatement, KvCounts, KvRateTotal, KvRecord, KvSupplierTotal, calculate_kv_dph,
};
pub use rates::{RateKind, VatRates, classify_rate, rates_on};
pub use service::{ContactRepository, InvoiceRepository, TaxService};
pub use sv::{EU_COUNTRIES, SummaryStatement, SupplyCode, SvRow, calculate_sv, is_eu_country};
pub use types::{
    Contact, Invoice, InvoiceItem, InvoiceKind, InvoiceStatus, SupplyKind, TaxPeriod, TaxWarning,
    VatTreatment, WarningReason,
};
