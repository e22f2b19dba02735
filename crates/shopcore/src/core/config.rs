use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Process-level configuration read from the environment.
///
/// Shop contents (catalog, payment assets, texts) live in [`crate::shop::ShopSettings`];
/// this module only covers how the process itself runs.
///
/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Public webhook URL for Telegram updates, e.g. `https://shop.example.com/telegram_bot`
/// Read from WEBHOOK_URL environment variable
pub static WEBHOOK_URL: Lazy<Option<String>> = Lazy::new(|| env::var("WEBHOOK_URL").ok());

/// Optional custom Bot API server
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Path of the TOML file with shop contents
/// Read from SHOP_CONFIG_PATH environment variable; built-in defaults apply when unset
pub static SHOP_CONFIG_PATH: Lazy<Option<String>> = Lazy::new(|| env::var("SHOP_CONFIG_PATH").ok());

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: shop.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "shop.log".to_string()));

/// Webhook server configuration
pub mod server {
    use once_cell::sync::Lazy;
    use std::env;

    /// Port the webhook HTTP server listens on
    /// Read from PORT environment variable (set by most hosting platforms)
    /// Default: 8080
    pub static PORT: Lazy<u16> = Lazy::new(|| env::var("PORT").ok().and_then(|s| s.parse().ok()).unwrap_or(8080));
}

/// Metrics configuration
pub mod metrics {
    use once_cell::sync::Lazy;
    use std::env;

    /// Expose /metrics on the webhook server
    /// Read from METRICS_ENABLED environment variable
    /// Default: true
    pub static ENABLED: Lazy<bool> = Lazy::new(|| {
        env::var("METRICS_ENABLED")
            .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true)
    });
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Price quote configuration
///
/// Provider URL and timeout are shop settings; see `config/default_shop.toml`.
pub mod quote {
    /// Fractional digits kept in a computed crypto amount
    pub const AMOUNT_DECIMAL_PLACES: u32 = 6;
}

/// Telegram limits
pub mod telegram {
    /// Maximum size of inline button callback data, in bytes
    pub const MAX_CALLBACK_DATA_LEN: usize = 64;
}
