//! Navigation tokens carried in inline button callback data.
//!
//! Every step of the shop is reconstructed from the token of the tapped button,
//! so the server keeps no session state. Wire forms:
//!
//! | Token | Wire form |
//! |---|---|
//! | `EnterShop` | `enter_shop` |
//! | `Region` | `<region>` |
//! | `Confirm` | `confirm_<region>_<item>_<price>` |
//! | `Pay` | `pay_<region>_<item>_<price>` |
//! | `PayWithCrypto` | `pay_with_crypto_<symbol>_<item>_<price>` |
//!
//! Fields never contain the separator: [`NavToken::encode`] refuses them, and any
//! other token that would decode into different fields, instead of producing it.

use std::str::FromStr;
use thiserror::Error;

use super::price::{Price, PriceParseError};
use crate::core::config::telegram::MAX_CALLBACK_DATA_LEN;

pub const SEPARATOR: char = '_';

pub const ENTER_SHOP: &str = "enter_shop";
const CONFIRM_PREFIX: &str = "confirm_";
const PAY_PREFIX: &str = "pay_";
const PAY_WITH_CRYPTO_PREFIX: &str = "pay_with_crypto_";

/// Words a region id must not be, so it cannot be mistaken for another token.
pub const RESERVED_WORDS: [&str; 4] = [ENTER_SHOP, "confirm", "pay", "back"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavToken {
    EnterShop,
    Region(String),
    Confirm { region: String, item: String, price: Price },
    Pay { region: String, item: String, price: Price },
    PayWithCrypto { symbol: String, item: String, price: Price },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is empty")]
    Empty,
    #[error("{field} '{value}' contains the separator '_'")]
    SeparatorInField { field: &'static str, value: String },
    #[error("{0} is empty")]
    EmptyField(&'static str),
    #[error("token '{0}' has an unknown prefix")]
    UnknownPrefix(String),
    #[error("token '{0}' is missing fields")]
    MissingFields(String),
    #[error("token '{0}' has more fields than expected")]
    ExtraFields(String),
    #[error("invalid price in token: {0}")]
    InvalidPrice(#[from] PriceParseError),
    #[error("token '{0}' decodes into different fields")]
    Ambiguous(String),
    #[error("token is {len} bytes, callback data allows {max}")]
    TooLong { len: usize, max: usize },
}

impl NavToken {
    /// Serializes the token for a button.
    pub fn encode(&self) -> Result<String, TokenError> {
        let encoded = match self {
            Self::EnterShop => ENTER_SHOP.to_string(),
            Self::Region(region) => {
                check_field("region", region)?;
                region.clone()
            }
            Self::Confirm { region, item, price } => {
                check_field("region", region)?;
                check_field("item", item)?;
                format!("{CONFIRM_PREFIX}{region}{SEPARATOR}{item}{SEPARATOR}{}", price.token_repr())
            }
            Self::Pay { region, item, price } => {
                check_field("region", region)?;
                check_field("item", item)?;
                format!("{PAY_PREFIX}{region}{SEPARATOR}{item}{SEPARATOR}{}", price.token_repr())
            }
            Self::PayWithCrypto { symbol, item, price } => {
                check_field("symbol", symbol)?;
                check_field("item", item)?;
                format!(
                    "{PAY_WITH_CRYPTO_PREFIX}{symbol}{SEPARATOR}{item}{SEPARATOR}{}",
                    price.token_repr()
                )
            }
        };

        if encoded.len() > MAX_CALLBACK_DATA_LEN {
            return Err(TokenError::TooLong {
                len: encoded.len(),
                max: MAX_CALLBACK_DATA_LEN,
            });
        }
        // Fields can still spell a longer prefix, e.g. region `with` + item `crypto`.
        if encoded.parse::<NavToken>().as_ref() != Ok(self) {
            return Err(TokenError::Ambiguous(encoded));
        }
        Ok(encoded)
    }

    /// Metrics/log label of the screen this token opens.
    pub fn screen_name(&self) -> &'static str {
        match self {
            Self::EnterShop => "region_list",
            Self::Region(_) => "item_list",
            Self::Confirm { .. } => "confirm",
            Self::Pay { .. } => "payment_method",
            Self::PayWithCrypto { .. } => "crypto_quote",
        }
    }
}

impl FromStr for NavToken {
    type Err = TokenError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        if data.is_empty() {
            return Err(TokenError::Empty);
        }
        if data == ENTER_SHOP {
            return Ok(Self::EnterShop);
        }

        // `pay_with_crypto_` also starts with `pay_`, so it is checked first.
        if let Some(rest) = data.strip_prefix(PAY_WITH_CRYPTO_PREFIX) {
            let (symbol, item, price) = split_fields(data, rest)?;
            return Ok(Self::PayWithCrypto { symbol, item, price });
        }
        if let Some(rest) = data.strip_prefix(CONFIRM_PREFIX) {
            let (region, item, price) = split_fields(data, rest)?;
            return Ok(Self::Confirm { region, item, price });
        }
        if let Some(rest) = data.strip_prefix(PAY_PREFIX) {
            let (region, item, price) = split_fields(data, rest)?;
            return Ok(Self::Pay { region, item, price });
        }

        if data.contains(SEPARATOR) {
            return Err(TokenError::UnknownPrefix(data.to_string()));
        }
        Ok(Self::Region(data.to_string()))
    }
}

/// Splits `<a>_<b>_<price>` with a bounded split; a separator that leaked into a
/// field ends up in the price and fails to parse there.
fn split_fields(data: &str, rest: &str) -> Result<(String, String, Price), TokenError> {
    let mut parts = rest.splitn(3, SEPARATOR);
    let (Some(first), Some(second), Some(price)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(TokenError::MissingFields(data.to_string()));
    };
    if first.is_empty() || second.is_empty() {
        return Err(TokenError::MissingFields(data.to_string()));
    }
    if price.contains(SEPARATOR) {
        return Err(TokenError::ExtraFields(data.to_string()));
    }
    if price.starts_with('$') {
        return Err(PriceParseError::NotANumber(price.to_string()).into());
    }
    Ok((first.to_string(), second.to_string(), price.parse()?))
}

fn check_field(field: &'static str, value: &str) -> Result<(), TokenError> {
    if value.is_empty() {
        return Err(TokenError::EmptyField(field));
    }
    if value.contains(SEPARATOR) {
        return Err(TokenError::SeparatorInField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
