//! CoinGecko `simple/price` client.
//!
//! `GET {base}/simple/price?ids=bitcoin&vs_currencies=usd` answers
//! `{"bitcoin":{"usd":50000.0}}`. Free API, no key required.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use super::{PriceError, PriceProvider};
use crate::shop::{PaymentAsset, ShopSettings};

const VS_CURRENCY: &str = "usd";

type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl CoinGeckoClient {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, PriceError> {
        let endpoint = Url::parse(&format!("{}/simple/price", api_base.trim_end_matches('/')))
            .map_err(|_| PriceError::InvalidBaseUrl(api_base.to_string()))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn from_settings(settings: &ShopSettings) -> Result<Self, PriceError> {
        Self::new(
            &settings.quote_api_base,
            Duration::from_secs(settings.quote_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoClient {
    async fn usd_price(&self, asset: &PaymentAsset) -> Result<Decimal, PriceError> {
        let id = asset.quote_id.as_str();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("ids", id), ("vs_currencies", VS_CURRENCY)])
            .send()
            .await?;

        if !response.status().is_success() {
            log::debug!("Price API returned status {} for {}", response.status(), id);
            return Err(PriceError::Status(response.status()));
        }

        let body: SimplePriceResponse = response.json().await?;
        let value = body
            .get(id)
            .and_then(|prices| prices.get(VS_CURRENCY))
            .copied()
            .ok_or_else(|| PriceError::MissingPrice(id.to_string()))?;

        Decimal::try_from(value).map_err(|_| PriceError::InvalidPrice {
            id: id.to_string(),
            value,
        })
    }
}
