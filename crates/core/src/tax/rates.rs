//! Statutory VAT rates.
//!
//! Rates are looked up by the tax point of the supply. Each version applies
//! from its first day until the next version starts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Statutory rate category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateKind {
    /// Základná sadzba.
    Standard,
    /// Prvá znížená sadzba.
    Reduced,
    /// Druhá znížená sadzba.
    SuperReduced,
}

/// Rates in force from a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VatRates {
    /// First day the rates apply.
    pub valid_from: (i32, u32, u32),
    /// Standard rate in percent.
    pub standard: Decimal,
    /// Reduced rate in percent.
    pub reduced: Decimal,
    /// Super-reduced rate in percent, if one exists.
    pub super_reduced: Option<Decimal>,
}

impl VatRates {
    fn starts(&self) -> Option<NaiveDate> {
        let (y, m, d) = self.valid_from;
        NaiveDate::from_ymd_opt(y, m, d)
    }

    /// Returns the category of `rate`, if it is one of these rates.
    #[must_use]
    pub fn classify(&self, rate: Decimal) -> Option<RateKind> {
        if rate == self.standard {
            Some(RateKind::Standard)
        } else if rate == self.reduced {
            Some(RateKind::Reduced)
        } else if self.super_reduced == Some(rate) {
            Some(RateKind::SuperReduced)
        } else {
            None
        }
    }

    /// Returns the percentage of a category, if it exists.
    #[must_use]
    pub fn rate_of(&self, kind: RateKind) -> Option<Decimal> {
        match kind {
            RateKind::Standard => Some(self.standard),
            RateKind::Reduced => Some(self.reduced),
            RateKind::SuperReduced => self.super_reduced,
        }
    }
}

// Ordered by `valid_from`.
const RATE_TABLE: &[VatRates] = &[
    VatRates {
        valid_from: (2011, 1, 1),
        standard: dec!(20),
        reduced: dec!(10),
        super_reduced: None,
    },
    VatRates {
        valid_from: (2023, 1, 1),
        standard: dec!(20),
        reduced: dec!(10),
        super_reduced: Some(dec!(5)),
    },
    VatRates {
        valid_from: (2025, 1, 1),
        standard: dec!(23),
        reduced: dec!(19),
        super_reduced: Some(dec!(5)),
    },
];

/// Returns the rates in force on `date`.
#[must_use]
pub fn rates_on(date: NaiveDate) -> Option<&'static VatRates> {
    RATE_TABLE
        .iter()
        .rev()
        .find(|rates| rates.starts().is_some_and(|start| start <= date))
}

/// Classifies a line rate at a tax point. `None` means unclassifiable.
#[must_use]
pub fn classify_rate(rate: Option<Decimal>, tax_point: NaiveDate) -> Option<(RateKind, Decimal)> {
    let rate = rate?;
    let kind = rates_on(tax_point)?.classify(rate.normalize())?;
    Some((kind, rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rates_change_in_2025() {
        let rates = rates_on(date(2024, 12, 31)).unwrap();
        assert_eq!(rates.standard, dec!(20));
        assert_eq!(rates.reduced, dec!(10));

        let rates = rates_on(date(2025, 1, 1)).unwrap();
        assert_eq!(rates.standard, dec!(23));
        assert_eq!(rates.reduced, dec!(19));
        assert_eq!(rates.super_reduced, Some(dec!(5)));
    }

    #[test]
    fn test_super_reduced_from_2023() {
        assert_eq!(rates_on(date(2022, 12, 31)).unwrap().super_reduced, None);
        assert_eq!(
            classify_rate(Some(dec!(5)), date(2022, 6, 1)),
            None
        );
        assert_eq!(
            classify_rate(Some(dec!(5)), date(2023, 6, 1)),
            Some((RateKind::SuperReduced, dec!(5)))
        );
    }

    #[test]
    fn test_classify_by_tax_point() {
        assert_eq!(
            classify_rate(Some(dec!(20.00)), date(2024, 11, 30)),
            Some((RateKind::Standard, dec!(20.00)))
        );
        // 20 % is no longer a statutory rate in 2025.
        assert_eq!(classify_rate(Some(dec!(20)), date(2025, 2, 1)), None);
        assert_eq!(
            classify_rate(Some(dec!(19)), date(2025, 2, 1)),
            Some((RateKind::Reduced, dec!(19)))
        );
        assert_eq!(classify_rate(None, date(2025, 2, 1)), None);
    }

    #[test]
    fn test_no_rates_before_table() {
        assert!(rates_on(date(2010, 12, 31)).is_none());
    }
}
