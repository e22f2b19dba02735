//! Navigation engine: one inbound event in, one outbound message out.
//!
//! The engine holds no state between calls. Everything it needs is the shop
//! (read-only), the token of the tapped button and, for the last step only, a
//! single price lookup.

use super::assets::PaymentAsset;
use super::price::Price;
use super::quote::Quote;
use super::screens::{self, Screen};
use super::settings::Shop;
use super::token::{NavToken, TokenError};
use crate::core::error::{AppError, AppResult};
use crate::core::metrics;
use crate::pricing::PriceProvider;

/// What the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// `/start` or any other entry into the bot
    Start,
    /// Tap on an inline button, carrying its callback data
    Callback(String),
}

/// The single message the transport must produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Send a new message
    Send(Screen),
    /// Replace the message whose button was tapped
    Edit(Screen),
}

impl Outbound {
    pub fn screen(&self) -> &Screen {
        match self {
            Self::Send(screen) | Self::Edit(screen) => screen,
        }
    }

    pub fn into_screen(self) -> Screen {
        match self {
            Self::Send(screen) | Self::Edit(screen) => screen,
        }
    }
}

/// Computes the next screen for an inbound event.
///
/// Never fails: malformed tokens fall back to the welcome screen and quote
/// failures render the "unable to fetch" message.
pub async fn navigate(shop: &Shop, prices: &dyn PriceProvider, inbound: &Inbound) -> Outbound {
    let data = match inbound {
        Inbound::Start => {
            metrics::NAVIGATION_TOTAL.with_label_values(&["welcome"]).inc();
            return Outbound::Send(screens::welcome(shop.settings()));
        }
        Inbound::Callback(data) => data,
    };

    let token = match data.parse::<NavToken>() {
        Ok(token) => token,
        Err(e) => {
            log::warn!("Unrecognized callback data '{}': {}", data, e);
            return fallback(shop);
        }
    };

    match render(shop, prices, &token).await {
        Ok(screen) => {
            log::debug!("Callback '{}' → {}", data, token.screen_name());
            metrics::NAVIGATION_TOTAL
                .with_label_values(&[token.screen_name()])
                .inc();
            Outbound::Edit(screen)
        }
        Err(e) => {
            log::warn!("Cannot render {} for '{}': {}", token.screen_name(), data, e);
            fallback(shop)
        }
    }
}

fn fallback(shop: &Shop) -> Outbound {
    metrics::NAVIGATION_TOTAL.with_label_values(&["fallback"]).inc();
    Outbound::Edit(screens::welcome(shop.settings()))
}

async fn render(shop: &Shop, prices: &dyn PriceProvider, token: &NavToken) -> Result<Screen, TokenError> {
    match token {
        NavToken::EnterShop => screens::region_list(shop.catalog().regions()),
        NavToken::Region(region) => screens::item_list(region, shop.catalog().items_for(region)),
        NavToken::Confirm { region, item, price } => screens::confirm(region, item, *price),
        NavToken::Pay { region, item, price } => screens::payment_method(region, item, *price, shop.assets()),
        NavToken::PayWithCrypto { symbol, item, price } => Ok(crypto_quote(shop, prices, symbol, item, *price).await),
    }
}

/// Final step. Performs at most one price lookup, bounded by the shop's quote timeout.
async fn crypto_quote(shop: &Shop, prices: &dyn PriceProvider, symbol: &str, item: &str, price: Price) -> Screen {
    let Some(asset) = shop.find_asset(symbol) else {
        log::warn!("Quote requested for unsupported asset '{}'", symbol);
        return quote_failed("unsupported_asset");
    };
    if asset.payout_address.is_empty() {
        log::error!("No payout address configured for {}", asset.symbol);
        return quote_failed("missing_address");
    }

    match quote_asset(shop, prices, asset, price).await {
        Ok(quote) => {
            log::info!(
                "Quote: {} at {} = {} {} (unit {})",
                item,
                price,
                quote.crypto_amount,
                asset.symbol,
                quote.crypto_unit_price
            );
            metrics::QUOTE_SUCCESS_TOTAL
                .with_label_values(&[asset.symbol.as_str()])
                .inc();
            screens::crypto_quote(item, price, &quote, asset, &shop.settings().footer)
        }
        Err(AppError::Timeout(after)) => {
            log::warn!("Price lookup for {} timed out after {:?}", asset.quote_id, after);
            quote_failed("timeout")
        }
        Err(AppError::Price(e)) => {
            log::warn!("Price lookup for {} failed: {}", asset.quote_id, e);
            quote_failed("price_unavailable")
        }
        Err(e) => {
            log::warn!("Rejected price for {}: {}", asset.quote_id, e);
            quote_failed("invalid_price")
        }
    }
}

/// Prices `fiat` in `asset`, bounding the lookup by the shop's quote timeout.
pub async fn quote_asset(shop: &Shop, prices: &dyn PriceProvider, asset: &PaymentAsset, fiat: Price) -> AppResult<Quote> {
    let timer = metrics::PRICE_LOOKUP_DURATION_SECONDS.start_timer();
    let lookup = tokio::time::timeout(shop.quote_timeout(), prices.usd_price(asset)).await;
    timer.observe_duration();

    let unit_price = lookup.map_err(|_| AppError::Timeout(shop.quote_timeout()))??;
    Ok(Quote::compute(fiat.amount(), unit_price)?)
}

fn quote_failed(reason: &str) -> Screen {
    metrics::QUOTE_FAILURE_TOTAL.with_label_values(&[reason]).inc();
    screens::quote_unavailable()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PriceError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FixedPrice {
        price: Decimal,
        calls: AtomicUsize,
    }

    impl FixedPrice {
        fn new(price: Decimal) -> Self {
            Self {
                price,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PriceProvider for FixedPrice {
        async fn usd_price(&self, _asset: &PaymentAsset) -> Result<Decimal, PriceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.price)
        }
    }

    struct NeverAnswers;

    #[async_trait]
    impl PriceProvider for NeverAnswers {
        async fn usd_price(&self, _asset: &PaymentAsset) -> Result<Decimal, PriceError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Decimal::ONE)
        }
    }

    fn shop() -> Shop {
        let mut settings = crate::shop::ShopSettings::defaults().unwrap();
        for asset in &mut settings.assets {
            asset.payout_address = format!("{}-address", asset.symbol.to_lowercase());
        }
        Shop::new(settings).unwrap()
    }

    async fn tap(shop: &Shop, prices: &dyn PriceProvider, data: &str) -> Outbound {
        navigate(shop, prices, &Inbound::Callback(data.to_string())).await
    }

    #[tokio::test]
    async fn test_start_sends_welcome() {
        let shop = shop();
        let out = navigate(&shop, &FixedPrice::new(dec!(1)), &Inbound::Start).await;
        match out {
            Outbound::Send(screen) => {
                assert!(screen.text.contains("@GiftCardzCheap"));
                assert_eq!(screen.keyboard[0][0].token, "enter_shop");
            }
            other => panic!("expected Send, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_token_falls_back_to_welcome() {
        let shop = shop();
        let prices = FixedPrice::new(dec!(1));
        let welcome = screens::welcome(shop.settings());

        for data in ["", "confirm_USA", "pay_with_crypto_BTC_Item_abc", "unknown_thing"] {
            assert_eq!(tap(&shop, &prices, data).await, Outbound::Edit(welcome.clone()), "data: {data}");
        }
        assert_eq!(prices.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_region_shows_only_back() {
        let shop = shop();
        let screen = tap(&shop, &FixedPrice::new(dec!(1)), "Atlantis").await.into_screen();
        assert_eq!(screen.keyboard.len(), 1);
        assert_eq!(screen.keyboard[0][0].token, "enter_shop");
    }

    #[tokio::test]
    async fn test_unsupported_symbol_makes_no_lookup() {
        let shop = shop();
        let prices = FixedPrice::new(dec!(50000));
        let screen = tap(&shop, &prices, "pay_with_crypto_DOGE_Amazon ($100)_35").await.into_screen();

        assert_eq!(screen.text, screens::QUOTE_UNAVAILABLE_TEXT);
        assert!(screen.is_terminal());
        assert_eq!(prices.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_zero_unit_price_is_a_quote_failure() {
        let shop = shop();
        let screen = tap(&shop, &FixedPrice::new(Decimal::ZERO), "pay_with_crypto_BTC_Amazon ($100)_35")
            .await
            .into_screen();
        assert_eq!(screen.text, screens::QUOTE_UNAVAILABLE_TEXT);
    }

    #[tokio::test]
    async fn test_missing_payout_address_is_a_quote_failure() {
        let mut settings = crate::shop::ShopSettings::defaults().unwrap();
        settings.assets[0].payout_address.clear();
        let shop = Shop::new(settings).unwrap();
        let prices = FixedPrice::new(dec!(50000));
        let screen = tap(&shop, &prices, "pay_with_crypto_BTC_Amazon ($100)_35").await.into_screen();

        assert_eq!(screen.text, screens::QUOTE_UNAVAILABLE_TEXT);
        assert_eq!(prices.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out() {
        let shop = shop();
        let screen = tap(&shop, &NeverAnswers, "pay_with_crypto_ETH_Steam ($100)_30").await.into_screen();
        assert_eq!(screen.text, screens::QUOTE_UNAVAILABLE_TEXT);
    }

    #[tokio::test]
    async fn test_quote_success_lookup_is_case_insensitive() {
        let shop = shop();
        let prices = FixedPrice::new(dec!(2000));
        let screen = tap(&shop, &prices, "pay_with_crypto_eth_Steam ($100)_30").await.into_screen();

        assert!(screen.text.contains("<code>0.015 ETH</code>"));
        assert!(screen.text.contains("<code>eth-address</code>"));
        assert_eq!(prices.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quote_asset_reports_timeout() {
        let shop = shop();
        let asset = shop.find_asset("BTC").unwrap();
        let price: Price = "$35".parse().unwrap();

        let err = quote_asset(&shop, &NeverAnswers, asset, price).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout(after) if after == shop.quote_timeout()));
    }
}
