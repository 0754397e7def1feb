//! EU summary statement (súhrnný výkaz).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lookup::{Counterparties, WarningLog};
use super::types::{
    Contact, Invoice, InvoiceKind, SupplyKind, TaxPeriod, TaxWarning, VatTreatment,
    WarningReason,
};

/// EU member states by VAT id prefix. Greece appears as both EL and GR.
pub const EU_COUNTRIES: &[&str] = &[
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "EL", "GR", "ES", "FI", "FR", "HR", "HU",
    "IE", "IT", "LT", "LU", "LV", "MT", "NL", "PL", "PT", "RO", "SE", "SI", "SK",
];

/// Returns true if `country` is an EU member state.
#[must_use]
pub fn is_eu_country(country: &str) -> bool {
    EU_COUNTRIES
        .iter()
        .any(|code| code.eq_ignore_ascii_case(country.trim()))
}

/// Supply code of a summary statement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SupplyCode {
    /// Code 0: supply of goods.
    Goods,
    /// Code 3: supply of services.
    Services,
}

impl SupplyCode {
    /// The numeric code printed on the form.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Goods => 0,
            Self::Services => 3,
        }
    }
}

impl From<SupplyKind> for SupplyCode {
    fn from(kind: SupplyKind) -> Self {
        match kind {
            SupplyKind::Goods => Self::Goods,
            SupplyKind::Services => Self::Services,
        }
    }
}

/// Total for one customer and supply code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvRow {
    /// Customer VAT id.
    pub counterparty_vat_id: String,
    /// Customer country.
    pub country: String,
    /// Goods or services.
    pub supply_code: SupplyCode,
    /// Signed total base.
    pub total_base: Decimal,
}

/// The summary statement for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStatement {
    /// Reporting period.
    pub period: TaxPeriod,
    /// Rows ordered by VAT id, then supply code.
    pub rows: Vec<SvRow>,
    /// Invoices left out.
    pub warnings: Vec<TaxWarning>,
}

/// Builds the summary statement from issued intra-community invoices.
#[must_use]
pub fn calculate_sv(
    period: &TaxPeriod,
    invoices: &[Invoice],
    contacts: &[Contact],
) -> SummaryStatement {
    let parties = Counterparties::new(contacts);
    let mut log = WarningLog::default();
    let mut totals: BTreeMap<(String, SupplyCode), (String, Decimal)> = BTreeMap::new();

    let eu_sales = invoices.iter().filter(|invoice| {
        period.includes(invoice)
            && invoice.kind == InvoiceKind::Issued
            && invoice.vat_treatment == VatTreatment::IntraCommunity
    });

    for invoice in eu_sales {
        let Some(customer) = parties.of(invoice) else {
            log.push(invoice, None, WarningReason::MissingCounterparty);
            continue;
        };
        if customer.is_in(&period.home_country) || !is_eu_country(&customer.country) {
            log.push(
                invoice,
                None,
                WarningReason::NonEuCounterparty {
                    country: customer.country.clone(),
                },
            );
            continue;
        }
        let Some(vat_id) = customer.vat_id() else {
            log.push(invoice, None, WarningReason::MissingVatId);
            continue;
        };

        for item in &invoice.items {
            let (_, total) = totals
                .entry((vat_id.to_string(), item.supply.into()))
                .or_insert_with(|| (customer.country.to_uppercase(), Decimal::ZERO));
            *total += item.base * invoice.sign();
        }
    }

    SummaryStatement {
        period: period.clone(),
        rows: totals
            .into_iter()
            .map(|((counterparty_vat_id, supply_code), (country, total_base))| SvRow {
                counterparty_vat_id,
                country,
                supply_code,
                total_base,
            })
            .collect(),
        warnings: log.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::testing::{contact, invoice, item};

    fn eu_sale(customer: &Contact, number: &str, lines: Vec<(Decimal, SupplyKind)>) -> Invoice {
        let items = lines
            .into_iter()
            .map(|(base, supply)| {
                let mut line = item(base, None, Decimal::ZERO);
                line.supply = supply;
                line
            })
            .collect();
        let mut sale = invoice(
            InvoiceKind::Issued,
            number,
            NaiveDate::from_ymd_opt(2025, 5, 12).unwrap(),
            items,
        );
        sale.contact_id = Some(customer.id);
        sale.vat_treatment = VatTreatment::IntraCommunity;
        sale
    }

    fn may_2025() -> TaxPeriod {
        TaxPeriod::month(2025, 5).unwrap()
    }

    #[test]
    fn test_rows_per_customer_and_supply_code() {
        let austrian = contact("AT", Some("ATU12345678"), true);
        let czech = contact("CZ", Some("CZ12345678"), true);
        let invoices = vec![
            eu_sale(
                &czech,
                "FV2025030",
                vec![(dec!(1000.00), SupplyKind::Goods), (dec!(200.00), SupplyKind::Services)],
            ),
            eu_sale(&austrian, "FV2025031", vec![(dec!(300.00), SupplyKind::Goods)]),
            eu_sale(&czech, "FV2025032", vec![(dec!(500.00), SupplyKind::Goods)]),
        ];

        let sv = calculate_sv(&may_2025(), &invoices, &[austrian, czech]);

        let summary: Vec<_> = sv
            .rows
            .iter()
            .map(|row| (row.counterparty_vat_id.as_str(), row.supply_code.code(), row.total_base))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("ATU12345678", 0, dec!(300.00)),
                ("CZ12345678", 0, dec!(1500.00)),
                ("CZ12345678", 3, dec!(200.00)),
            ]
        );
        assert!(sv.warnings.is_empty());
    }

    #[test]
    fn test_credit_note_reduces_total() {
        let german = contact("DE", Some("DE123456789"), true);
        let sale = eu_sale(&german, "FV2025033", vec![(dec!(1000.00), SupplyKind::Goods)]);
        let mut credit = eu_sale(&german, "DB2025033", vec![(dec!(250.00), SupplyKind::Goods)]);
        credit.is_credit_note = true;

        let sv = calculate_sv(&may_2025(), &[sale, credit], &[german]);

        assert_eq!(sv.rows.len(), 1);
        assert_eq!(sv.rows[0].total_base, dec!(750.00));
    }

    #[test]
    fn test_domestic_and_non_eu_customers_are_warned() {
        let domestic = contact("SK", Some("SK2020123456"), true);
        let swiss = contact("CH", Some("CHE123456789"), true);
        let invoices = vec![
            eu_sale(&domestic, "FV2025034", vec![(dec!(100.00), SupplyKind::Goods)]),
            eu_sale(&swiss, "FV2025035", vec![(dec!(100.00), SupplyKind::Goods)]),
        ];

        let sv = calculate_sv(&may_2025(), &invoices, &[domestic, swiss]);

        assert!(sv.rows.is_empty());
        assert_eq!(sv.warnings.len(), 2);
        assert!(sv.warnings.iter().all(|warning| matches!(
            warning.reason,
            WarningReason::NonEuCounterparty { .. }
        )));
    }

    #[test]
    fn test_customer_without_vat_id_is_warned() {
        let customer = contact("PL", None, false);
        let sale = eu_sale(&customer, "FV2025036", vec![(dec!(100.00), SupplyKind::Goods)]);

        let sv = calculate_sv(&may_2025(), &[sale], &[customer]);

        assert!(sv.rows.is_empty());
        assert_eq!(sv.warnings[0].reason, WarningReason::MissingVatId);
    }

    #[test]
    fn test_eu_country_list() {
        assert!(is_eu_country("el"));
        assert!(is_eu_country("DE"));
        assert!(!is_eu_country("GB"));
        assert!(!is_eu_country("NO"));
    }
}
