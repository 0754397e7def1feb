//! Currency codes and cent rounding.
//!
//! CRITICAL: Never use floating-point for money calculations. Amounts are
//! `rust_decimal::Decimal` throughout.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places used for statutory money amounts (euro cents).
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to whole cents, half away from zero.
///
/// Slovak tax forms round commercially, not with banker's rounding.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// ISO 4217 currency codes supported by the system.
///
/// The functional currency of a Slovak company is always EUR; the others
/// appear on foreign invoices and bank statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro
    #[default]
    Eur,
    /// Czech Koruna
    Czk,
    /// Hungarian Forint
    Huf,
    /// Polish Zloty
    Pln,
    /// Pound Sterling
    Gbp,
    /// US Dollar
    Usd,
}

impl Currency {
    /// The ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Czk => "CZK",
            Self::Huf => "HUF",
            Self::Pln => "PLN",
            Self::Gbp => "GBP",
            Self::Usd => "USD",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EUR" => Ok(Self::Eur),
            "CZK" => Ok(Self::Czk),
            "HUF" => Ok(Self::Huf),
            "PLN" => Ok(Self::Pln),
            "GBP" => Ok(Self::Gbp),
            "USD" => Ok(Self::Usd),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(2666.665)), dec!(2666.67));
        assert_eq!(round_money(dec!(-2666.665)), dec!(-2666.67));
        assert_eq!(round_money(dec!(3333.3333)), dec!(3333.33));
        assert_eq!(round_money(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("EUR").unwrap(), Currency::Eur);
        assert_eq!(Currency::from_str("czk").unwrap(), Currency::Czk);
        assert!(Currency::from_str("SKK").is_err());
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Huf.to_string(), "HUF");
        assert_eq!(Currency::default(), Currency::Eur);
    }
}
