//! Shopcore - Telegram-free core of the gift card shop bot
//!
//! This crate contains everything the bot does apart from talking to Telegram:
//! - Catalog, payment assets and validated shop settings
//! - Navigation tokens and the stateless navigation engine
//! - Quote computation and the USD price provider
//! - Configuration, error handling, logging and metrics

pub mod core;
pub mod pricing;
pub mod shop;

pub use pricing::{CoinGeckoClient, PriceError, PriceProvider};
pub use shop::{navigate, Inbound, Outbound, Screen, Shop, ShopSettings};
