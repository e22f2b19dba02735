//! USD price lookups for payment assets.

mod coingecko;

pub use coingecko::CoinGeckoClient;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::shop::PaymentAsset;

#[derive(Debug, Error)]
pub enum PriceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("price API returned status: {0}")]
    Status(reqwest::StatusCode),

    #[error("price API base '{0}' is not a valid URL")]
    InvalidBaseUrl(String),

    #[error("no USD price for '{0}' in response")]
    MissingPrice(String),

    #[error("price {value} for '{id}' is not a finite decimal")]
    InvalidPrice { id: String, value: f64 },
}

/// Returns the current USD price of one unit of an asset.
///
/// Implementations must fail rather than hang; the navigation engine also
/// bounds every call with the shop's quote timeout.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn usd_price(&self, asset: &PaymentAsset) -> Result<Decimal, PriceError>;
}
