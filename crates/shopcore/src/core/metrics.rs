//! Prometheus metrics for the shop bot
//!
//! Tracks:
//! - Navigation steps by rendered screen
//! - Quote outcomes (success by asset, failure by reason)
//! - Price lookup latency
//! - Incoming Telegram updates by kind

// Metric definitions are static; registration only fails on duplicate names.
#![allow(clippy::expect_used)]

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, Encoder, Histogram, IntCounterVec, TextEncoder,
};

/// Navigation steps rendered
/// Labels: screen (welcome/region_list/item_list/confirm/payment_method/crypto_quote/fallback)
pub static NAVIGATION_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "shop_navigation_total",
        "Total number of navigation steps by rendered screen",
        &["screen"]
    )
    .expect("shop_navigation_total registers once")
});

/// Successful quotes
/// Labels: symbol
pub static QUOTE_SUCCESS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "shop_quote_success_total",
        "Total number of payment quotes shown",
        &["symbol"]
    )
    .expect("shop_quote_success_total registers once")
});

/// Failed quotes
/// Labels: reason (unsupported_asset/missing_address/price_unavailable/timeout/invalid_price)
pub static QUOTE_FAILURE_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "shop_quote_failure_total",
        "Total number of quotes that could not be computed",
        &["reason"]
    )
    .expect("shop_quote_failure_total registers once")
});

/// Price provider round trip time
pub static PRICE_LOOKUP_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "shop_price_lookup_duration_seconds",
        "Time spent waiting for the price provider",
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("shop_price_lookup_duration_seconds registers once")
});

/// Incoming updates
/// Labels: kind (command/callback)
pub static UPDATES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "shop_updates_total",
        "Total number of Telegram updates handled",
        &["kind"]
    )
    .expect("shop_updates_total registers once")
});

/// Forces registration so every series shows up on the first scrape.
pub fn init_metrics() {
    Lazy::force(&NAVIGATION_TOTAL);
    Lazy::force(&QUOTE_SUCCESS_TOTAL);
    Lazy::force(&QUOTE_FAILURE_TOTAL);
    Lazy::force(&PRICE_LOOKUP_DURATION_SECONDS);
    Lazy::force(&UPDATES_TOTAL);
    log::info!("Metrics registry initialized");
}

/// Renders the default registry in the Prometheus text exposition format.
pub fn render() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_registered_metrics() {
        init_metrics();
        NAVIGATION_TOTAL.with_label_values(&["welcome"]).inc();

        let text = render().unwrap();
        assert!(text.contains("shop_navigation_total"));
        assert!(text.contains("screen=\"welcome\""));
    }

    #[test]
    fn test_counter_increments() {
        let before = QUOTE_FAILURE_TOTAL.with_label_values(&["unsupported_asset"]).get();
        QUOTE_FAILURE_TOTAL.with_label_values(&["unsupported_asset"]).inc();
        let after = QUOTE_FAILURE_TOTAL.with_label_values(&["unsupported_asset"]).get();
        assert_eq!(after, before + 1);
    }
}
