//! The shop itself: catalog, payment assets, settings, navigation tokens,
//! quotes, screens and the navigation engine tying them together.

pub mod assets;
pub mod catalog;
pub mod navigation;
pub mod price;
pub mod quote;
pub mod screens;
pub mod settings;
pub mod token;

pub use assets::{find_asset, PaymentAsset};
pub use catalog::{Catalog, CatalogItem, Region};
pub use navigation::{navigate, quote_asset, Inbound, Outbound};
pub use price::{Price, PriceParseError};
pub use quote::{Quote, QuoteError};
pub use screens::{Button, Screen, TextFormat};
pub use settings::{SettingsError, Shop, ShopSettings};
pub use token::{NavToken, TokenError};
