//! Control statement (kontrolný výkaz DPH).
//!
//! Sections A1, A2, B1, B2, C1 and C2 list invoice lines. B3 aggregates per
//! supplier, D1 and D2 aggregate per rate. C1 and C2 hold credit notes to
//! A1 and B2 invoices; every other credit note is a negative amount in the
//! section of the invoice it corrects.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ucto_shared::types::round_money;

use super::lookup::{Counterparties, WarningLog};
use super::rates::classify_rate;
use super::types::{
    Contact, Invoice, InvoiceItem, InvoiceKind, TaxPeriod, TaxWarning, VatTreatment,
    WarningReason,
};

/// One line-level record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvRecord {
    /// Invoice number.
    pub invoice_number: String,
    /// Counterparty VAT id. Only B1 imports may lack one.
    pub counterparty_vat_id: Option<String>,
    /// Tax point.
    pub tax_point: NaiveDate,
    /// Signed base.
    pub base: Decimal,
    /// Signed VAT.
    pub vat_amount: Decimal,
    /// Rate in percent.
    pub vat_rate: Option<Decimal>,
    /// Commodity code (A2 goods).
    pub commodity_code: Option<String>,
    /// Corrected invoice (C1, C2).
    pub original_invoice_number: Option<String>,
}

/// B3 total for one supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvSupplierTotal {
    /// Supplier VAT id.
    pub counterparty_vat_id: String,
    /// Signed base.
    pub base: Decimal,
    /// Signed VAT.
    pub vat_amount: Decimal,
}

/// D1 or D2 total for one rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvRateTotal {
    /// Rate in percent.
    pub vat_rate: Decimal,
    /// Signed base.
    pub base: Decimal,
    /// Signed VAT.
    pub vat_amount: Decimal,
}

/// Number of records per section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvCounts {
    /// A1 records.
    pub a1: usize,
    /// A2 records.
    pub a2: usize,
    /// B1 records.
    pub b1: usize,
    /// B2 records.
    pub b2: usize,
    /// B3 records.
    pub b3: usize,
    /// C1 records.
    pub c1: usize,
    /// C2 records.
    pub c2: usize,
    /// D1 records.
    pub d1: usize,
    /// D2 records.
    pub d2: usize,
}

/// The control statement for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlStatement {
    /// Reporting period.
    pub period: TaxPeriod,
    /// Supplies to domestic VAT payers.
    pub a1: Vec<KvRecord>,
    /// Supplies under domestic reverse charge.
    pub a2: Vec<KvRecord>,
    /// Received supplies with self-assessed VAT.
    pub b1: Vec<KvRecord>,
    /// Received domestic supplies with deductible VAT.
    pub b2: Vec<KvRecord>,
    /// Simplified invoices and cash receipts per supplier.
    pub b3: Vec<KvSupplierTotal>,
    /// Issued credit notes.
    pub c1: Vec<KvRecord>,
    /// Received credit notes.
    pub c2: Vec<KvRecord>,
    /// Cash register sales per rate.
    pub d1: Vec<KvRateTotal>,
    /// Other domestic sales per rate.
    pub d2: Vec<KvRateTotal>,
    /// Lines left out of the statement.
    pub warnings: Vec<TaxWarning>,
}

impl ControlStatement {
    /// Returns the number of records in each section.
    #[must_use]
    pub fn counts(&self) -> KvCounts {
        KvCounts {
            a1: self.a1.len(),
            a2: self.a2.len(),
            b1: self.b1.len(),
            b2: self.b2.len(),
            b3: self.b3.len(),
            c1: self.c1.len(),
            c2: self.c2.len(),
            d1: self.d1.len(),
            d2: self.d2.len(),
        }
    }
}

/// Builds the control statement.
#[must_use]
pub fn calculate_kv_dph(
    period: &TaxPeriod,
    invoices: &[Invoice],
    contacts: &[Contact],
) -> ControlStatement {
    let parties = Counterparties::new(contacts);
    let mut builder = Builder::new(period);

    for invoice in invoices.iter().filter(|invoice| period.includes(invoice)) {
        let contact = parties.of(invoice);
        match invoice.kind {
            InvoiceKind::Issued => builder.issued(invoice, contact),
            InvoiceKind::Received => builder.received(invoice, contact),
        }
    }

    builder.finish()
}

#[derive(Default)]
struct Totals {
    base: Decimal,
    vat: Decimal,
}

impl Totals {
    fn add(&mut self, base: Decimal, vat: Decimal) {
        self.base += base;
        self.vat += vat;
    }
}

struct Builder<'p> {
    period: &'p TaxPeriod,
    a1: Vec<KvRecord>,
    a2: Vec<KvRecord>,
    b1: Vec<KvRecord>,
    b2: Vec<KvRecord>,
    b3: BTreeMap<String, Totals>,
    c1: Vec<KvRecord>,
    c2: Vec<KvRecord>,
    d1: BTreeMap<Decimal, Totals>,
    d2: BTreeMap<Decimal, Totals>,
    log: WarningLog,
}

impl<'p> Builder<'p> {
    fn new(period: &'p TaxPeriod) -> Self {
        Self {
            period,
            a1: Vec::new(),
            a2: Vec::new(),
            b1: Vec::new(),
            b2: Vec::new(),
            b3: BTreeMap::new(),
            c1: Vec::new(),
            c2: Vec::new(),
            d1: BTreeMap::new(),
            d2: BTreeMap::new(),
            log: WarningLog::default(),
        }
    }

    /// Routes an issued invoice. A credit note lands in C1 only where its
    /// original belongs to A1; otherwise it reduces the original's section.
    fn issued(&mut self, invoice: &Invoice, contact: Option<&Contact>) {
        if matches!(
            invoice.vat_treatment,
            VatTreatment::IntraCommunity | VatTreatment::ThirdCountry | VatTreatment::Exempt
        ) {
            return;
        }

        if invoice.vat_treatment == VatTreatment::DomesticReverseCharge {
            let Some(vat_id) = self.require_vat_id(invoice, contact) else {
                return;
            };
            for item in &invoice.items {
                self.a2.push(KvRecord {
                    vat_amount: Decimal::ZERO,
                    vat_rate: None,
                    commodity_code: item.commodity_code.clone(),
                    ..record(invoice, item, Some(vat_id.clone()))
                });
            }
            return;
        }

        if invoice.is_cash_register {
            self.per_rate(invoice, Section::D1);
            return;
        }

        match contact {
            Some(contact) if contact.is_vat_payer && contact.is_in(&self.period.home_country) => {
                let Some(vat_id) = contact.vat_id().map(str::to_string) else {
                    self.per_rate(invoice, Section::D2);
                    return;
                };
                for item in &invoice.items {
                    if !self.classified(invoice, item) {
                        continue;
                    }
                    if invoice.is_credit_note {
                        self.c1.push(credit_note_record(invoice, item, vat_id.clone()));
                    } else {
                        self.a1.push(record(invoice, item, Some(vat_id.clone())));
                    }
                }
            }
            _ => self.per_rate(invoice, Section::D2),
        }
    }

    /// Routes a received invoice. A credit note lands in C2 only where its
    /// original belongs to B2; otherwise it reduces the original's section.
    fn received(&mut self, invoice: &Invoice, contact: Option<&Contact>) {
        let treatment = invoice.vat_treatment;
        if treatment == VatTreatment::Exempt {
            return;
        }

        if treatment.is_self_assessed() {
            let vat_id = if treatment == VatTreatment::ThirdCountry {
                contact.and_then(Contact::vat_id).map(str::to_string)
            } else {
                let Some(vat_id) = self.require_vat_id(invoice, contact) else {
                    return;
                };
                Some(vat_id)
            };
            for item in &invoice.items {
                let Some((_, rate)) = classify_rate(item.vat_rate, invoice.tax_point()) else {
                    self.log.push(invoice, Some(item.id), unknown_rate(invoice, item));
                    continue;
                };
                let base = item.base * invoice.sign();
                self.b1.push(KvRecord {
                    vat_amount: round_money(base * rate / Decimal::ONE_HUNDRED),
                    original_invoice_number: invoice
                        .original_number
                        .clone()
                        .filter(|_| invoice.is_credit_note),
                    ..record(invoice, item, vat_id.clone())
                });
            }
            return;
        }

        let Some(vat_id) = self.require_vat_id(invoice, contact) else {
            return;
        };

        if invoice.is_simplified || invoice.is_cash_register {
            let totals = self.b3.entry(vat_id).or_default();
            for item in &invoice.items {
                totals.add(item.base * invoice.sign(), item.vat_amount * invoice.sign());
            }
            return;
        }

        for item in &invoice.items {
            if !self.classified(invoice, item) {
                continue;
            }
            if invoice.is_credit_note {
                self.c2.push(credit_note_record(invoice, item, vat_id.clone()));
            } else {
                self.b2.push(record(invoice, item, Some(vat_id.clone())));
            }
        }
    }

    fn require_vat_id(&mut self, invoice: &Invoice, contact: Option<&Contact>) -> Option<String> {
        let Some(contact) = contact else {
            self.log.push(invoice, None, WarningReason::MissingCounterparty);
            return None;
        };
        let vat_id = contact.vat_id().map(str::to_string);
        if vat_id.is_none() {
            self.log.push(invoice, None, WarningReason::MissingVatId);
        }
        vat_id
    }

    fn classified(&mut self, invoice: &Invoice, item: &InvoiceItem) -> bool {
        if classify_rate(item.vat_rate, invoice.tax_point()).is_some() {
            true
        } else {
            self.log.push(invoice, Some(item.id), unknown_rate(invoice, item));
            false
        }
    }

    fn per_rate(&mut self, invoice: &Invoice, section: Section) {
        let sign = invoice.sign();
        for item in &invoice.items {
            let Some((_, rate)) = classify_rate(item.vat_rate, invoice.tax_point()) else {
                self.log.push(invoice, Some(item.id), unknown_rate(invoice, item));
                continue;
            };
            let totals = match section {
                Section::D1 => &mut self.d1,
                Section::D2 => &mut self.d2,
            };
            totals
                .entry(rate.normalize())
                .or_default()
                .add(item.base * sign, item.vat_amount * sign);
        }
    }

    fn finish(self) -> ControlStatement {
        ControlStatement {
            period: self.period.clone(),
            a1: self.a1,
            a2: self.a2,
            b1: self.b1,
            b2: self.b2,
            b3: self
                .b3
                .into_iter()
                .map(|(counterparty_vat_id, totals)| KvSupplierTotal {
                    counterparty_vat_id,
                    base: totals.base,
                    vat_amount: totals.vat,
                })
                .collect(),
            c1: self.c1,
            c2: self.c2,
            d1: rate_totals(self.d1),
            d2: rate_totals(self.d2),
            warnings: self.log.into_inner(),
        }
    }
}

#[derive(Clone, Copy)]
enum Section {
    D1,
    D2,
}

fn record(invoice: &Invoice, item: &InvoiceItem, vat_id: Option<String>) -> KvRecord {
    let sign = invoice.sign();
    KvRecord {
        invoice_number: invoice.number.clone(),
        counterparty_vat_id: vat_id,
        tax_point: invoice.tax_point(),
        base: item.base * sign,
        vat_amount: item.vat_amount * sign,
        vat_rate: item.vat_rate,
        commodity_code: None,
        original_invoice_number: None,
    }
}

fn credit_note_record(invoice: &Invoice, item: &InvoiceItem, vat_id: String) -> KvRecord {
    KvRecord {
        original_invoice_number: invoice.original_number.clone(),
        ..record(invoice, item, Some(vat_id))
    }
}

fn rate_totals(map: BTreeMap<Decimal, Totals>) -> Vec<KvRateTotal> {
    map.into_iter()
        .map(|(vat_rate, totals)| KvRateTotal {
            vat_rate,
            base: totals.base,
            vat_amount: totals.vat,
        })
        .collect()
}

fn unknown_rate(invoice: &Invoice, item: &InvoiceItem) -> WarningReason {
    WarningReason::UnknownVatRate {
        rate: item.vat_rate,
        tax_point: invoice.tax_point(),
    }
}
