//! USD prices, normalized to decimals when settings load.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A price in US dollars.
///
/// Displayed as `$35` or `$12.50`; carried in navigation tokens as the bare
/// normalized amount (`35`, `12.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "PriceRepr", into = "String")]
pub struct Price(Decimal);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceParseError {
    #[error("price is empty")]
    Empty,
    #[error("price '{0}' is not a number")]
    NotANumber(String),
    #[error("price must be greater than zero, got {0}")]
    NotPositive(Decimal),
}

impl Price {
    /// Builds a price, rejecting zero and negative amounts.
    pub fn new(amount: Decimal) -> Result<Self, PriceParseError> {
        if amount <= Decimal::ZERO {
            return Err(PriceParseError::NotPositive(amount));
        }
        Ok(Self(amount.normalize()))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Bare amount as written into navigation tokens.
    pub fn token_repr(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Cents keep two places; finer amounts are shown as configured.
        if self.0.fract().is_zero() || self.0.scale() > 2 {
            write!(f, "${}", self.0)
        } else {
            write!(f, "${:.2}", self.0)
        }
    }
}

/// Accepts `35`, `35.50` and the display form `$35`.
impl FromStr for Price {
    type Err = PriceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
        if bare.is_empty() {
            return Err(PriceParseError::Empty);
        }
        let amount = Decimal::from_str(bare).map_err(|_| PriceParseError::NotANumber(s.to_string()))?;
        Self::new(amount)
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Text(String),
    Number(Decimal),
}

impl TryFrom<PriceRepr> for Price {
    type Error = PriceParseError;

    fn try_from(repr: PriceRepr) -> Result<Self, Self::Error> {
        match repr {
            PriceRepr::Text(text) => text.parse(),
            PriceRepr::Number(amount) => Price::new(amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_display_form() {
        let price: Price = "$35".parse().unwrap();
        assert_eq!(price.amount(), dec!(35));
        assert_eq!(price.to_string(), "$35");
        assert_eq!(price.token_repr(), "35");
    }

    #[test]
    fn test_parse_bare_and_fractional() {
        assert_eq!("90".parse::<Price>().unwrap().amount(), dec!(90));
        let price: Price = "$12.50".parse().unwrap();
        assert_eq!(price.token_repr(), "12.5");
        assert_eq!(price.to_string(), "$12.50");
        assert_eq!("$20.5".parse::<Price>().unwrap().to_string(), "$20.50");
        assert_eq!("$0.125".parse::<Price>().unwrap().to_string(), "$0.125");
    }

    #[test]
    fn test_display_form_parses_back() {
        let price: Price = "$12.50".parse().unwrap();
        assert_eq!(price.to_string().parse::<Price>().unwrap(), price);
    }

    #[test]
    fn test_rejects_bad_prices() {
        assert_eq!("".parse::<Price>(), Err(PriceParseError::Empty));
        assert_eq!("$".parse::<Price>(), Err(PriceParseError::Empty));
        assert!(matches!("abc".parse::<Price>(), Err(PriceParseError::NotANumber(_))));
        assert!(matches!("$0".parse::<Price>(), Err(PriceParseError::NotPositive(_))));
        assert!(matches!("-5".parse::<Price>(), Err(PriceParseError::NotPositive(_))));
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let from_text: Price = serde_json::from_str("\"$30\"").unwrap();
        let from_number: Price = serde_json::from_str("30").unwrap();
        assert_eq!(from_text, from_number);
        assert_eq!(serde_json::to_string(&from_text).unwrap(), "\"$30\"");
    }
}
