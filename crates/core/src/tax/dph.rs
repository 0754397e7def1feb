//! Periodic VAT return (daňové priznanie k DPH).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ucto_shared::types::round_money;

use super::lookup::WarningLog;
use super::rates::{RateKind, classify_rate};
use super::types::{
    Invoice, InvoiceItem, InvoiceKind, TaxPeriod, TaxWarning, VatTreatment, WarningReason,
};

/// Base and VAT of one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBucket {
    /// Taxable base.
    pub base: Decimal,
    /// VAT.
    pub vat: Decimal,
}

impl RateBucket {
    fn add(&mut self, base: Decimal, vat: Decimal) {
        self.base += base;
        self.vat += vat;
    }
}

/// Buckets per statutory rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBuckets {
    /// Standard rate.
    pub standard: RateBucket,
    /// Reduced rate.
    pub reduced: RateBucket,
    /// Super-reduced rate.
    pub super_reduced: RateBucket,
}

impl RateBuckets {
    /// Adds an amount to the bucket of `kind`.
    pub fn add(&mut self, kind: RateKind, base: Decimal, vat: Decimal) {
        let bucket = match kind {
            RateKind::Standard => &mut self.standard,
            RateKind::Reduced => &mut self.reduced,
            RateKind::SuperReduced => &mut self.super_reduced,
        };
        bucket.add(base, vat);
    }

    /// VAT across all rates.
    #[must_use]
    pub fn total_vat(&self) -> Decimal {
        self.standard.vat + self.reduced.vat + self.super_reduced.vat
    }
}

/// Figures of the periodic VAT return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicReturn {
    /// Reporting period.
    pub period: TaxPeriod,
    /// Output VAT on domestic supplies, per rate.
    pub output: RateBuckets,
    /// VAT self-assessed on received supplies, per rate.
    pub self_assessed: RateBuckets,
    /// Deductible input VAT.
    pub input: RateBucket,
    /// Supplies under domestic reverse charge.
    pub domestic_reverse_charge_base: Decimal,
    /// Intra-community supplies of goods and services.
    pub intra_community_supply_base: Decimal,
    /// Exports outside the EU.
    pub export_base: Decimal,
    /// Exempt supplies.
    pub exempt_base: Decimal,
    /// Output VAT including self-assessed VAT.
    pub total_output_vat: Decimal,
    /// Deductible input VAT.
    pub total_input_vat: Decimal,
    /// Output minus input. Negative means a refund.
    pub net_liability: Decimal,
    /// Lines left out of the figures.
    pub warnings: Vec<TaxWarning>,
}

impl PeriodicReturn {
    fn empty(period: &TaxPeriod) -> Self {
        Self {
            period: period.clone(),
            output: RateBuckets::default(),
            self_assessed: RateBuckets::default(),
            input: RateBucket::default(),
            domestic_reverse_charge_base: Decimal::ZERO,
            intra_community_supply_base: Decimal::ZERO,
            export_base: Decimal::ZERO,
            exempt_base: Decimal::ZERO,
            total_output_vat: Decimal::ZERO,
            total_input_vat: Decimal::ZERO,
            net_liability: Decimal::ZERO,
            warnings: Vec::new(),
        }
    }

    /// Returns true if the period produces a refund.
    #[must_use]
    pub fn is_refund(&self) -> bool {
        self.net_liability.is_sign_negative() && !self.net_liability.is_zero()
    }
}

/// Computes the periodic VAT return.
///
/// Credit notes subtract. Lines whose rate cannot be classified at the tax
/// point are left out and reported as warnings.
#[must_use]
pub fn calculate_dph(period: &TaxPeriod, invoices: &[Invoice]) -> PeriodicReturn {
    let mut result = PeriodicReturn::empty(period);
    let mut log = WarningLog::default();

    for invoice in invoices.iter().filter(|invoice| period.includes(invoice)) {
        let sign = invoice.sign();
        for item in &invoice.items {
            let base = item.base * sign;
            match invoice.kind {
                InvoiceKind::Issued => {
                    issued_line(&mut result, &mut log, invoice, item, base, sign);
                }
                InvoiceKind::Received => {
                    received_line(&mut result, &mut log, invoice, item, base, sign);
                }
            }
        }
    }

    result.total_output_vat = result.output.total_vat() + result.self_assessed.total_vat();
    result.total_input_vat = result.input.vat;
    result.net_liability = result.total_output_vat - result.total_input_vat;
    result.warnings = log.into_inner();
    result
}

fn unknown_rate(invoice: &Invoice, item: &InvoiceItem) -> WarningReason {
    WarningReason::UnknownVatRate {
        rate: item.vat_rate,
        tax_point: invoice.tax_point(),
    }
}

fn issued_line(
    result: &mut PeriodicReturn,
    log: &mut WarningLog,
    invoice: &Invoice,
    item: &InvoiceItem,
    base: Decimal,
    sign: Decimal,
) {
    match invoice.vat_treatment {
        VatTreatment::Standard => match classify_rate(item.vat_rate, invoice.tax_point()) {
            Some((kind, _)) => result.output.add(kind, base, item.vat_amount * sign),
            None => log.push(invoice, Some(item.id), unknown_rate(invoice, item)),
        },
        VatTreatment::DomesticReverseCharge => result.domestic_reverse_charge_base += base,
        VatTreatment::IntraCommunity => result.intra_community_supply_base += base,
        VatTreatment::ThirdCountry => result.export_base += base,
        VatTreatment::Exempt => result.exempt_base += base,
    }
}

fn received_line(
    result: &mut PeriodicReturn,
    log: &mut WarningLog,
    invoice: &Invoice,
    item: &InvoiceItem,
    base: Decimal,
    sign: Decimal,
) {
    let treatment = invoice.vat_treatment;
    if treatment == VatTreatment::Exempt {
        return;
    }
    let Some((kind, rate)) = classify_rate(item.vat_rate, invoice.tax_point()) else {
        log.push(invoice, Some(item.id), unknown_rate(invoice, item));
        return;
    };

    if treatment.is_self_assessed() {
        let vat = round_money(base * rate / Decimal::ONE_HUNDRED);
        result.self_assessed.add(kind, base, vat);
        result.input.add(base, vat);
    } else {
        result.input.add(base, item.vat_amount * sign);
    }
}
