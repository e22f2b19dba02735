use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::core::config::quote::AMOUNT_DECIMAL_PLACES;

/// A fiat price converted into a cryptocurrency amount. Computed per request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub fiat_amount: Decimal,
    pub crypto_unit_price: Decimal,
    pub crypto_amount: Decimal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("crypto unit price must be greater than zero")]
    NonPositiveUnitPrice,
    #[error("fiat amount must be greater than zero")]
    NonPositiveFiatAmount,
    #[error("quote arithmetic overflowed")]
    Overflow,
}

impl Quote {
    /// `fiat / unit_price`, rounded half-up to six fractional digits.
    pub fn compute(fiat_amount: Decimal, crypto_unit_price: Decimal) -> Result<Self, QuoteError> {
        if crypto_unit_price <= Decimal::ZERO {
            return Err(QuoteError::NonPositiveUnitPrice);
        }
        if fiat_amount <= Decimal::ZERO {
            return Err(QuoteError::NonPositiveFiatAmount);
        }

        let raw = fiat_amount
            .checked_div(crypto_unit_price)
            .ok_or(QuoteError::Overflow)?;
        let crypto_amount = raw
            .round_dp_with_strategy(AMOUNT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
            .normalize();

        Ok(Self {
            fiat_amount,
            crypto_unit_price,
            crypto_amount,
        })
    }
}
