//! Shop contents: loaded once at startup, validated, then shared read-only.

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::assets::{find_asset, PaymentAsset};
use super::catalog::{Catalog, CatalogItem, Region};
use super::price::Price;
use super::token::{NavToken, TokenError, RESERVED_WORDS, SEPARATOR};

/// Built-in shop contents; see the file for the override rules.
pub const DEFAULT_SHOP_TOML: &str = include_str!("../../config/default_shop.toml");

/// Prefix of environment variables that override scalar settings.
pub const ENV_PREFIX: &str = "SHOP_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShopSettings {
    pub shop_name: String,
    pub support_contact: String,
    pub footer: String,
    pub regions: Vec<RegionSettings>,
    pub assets: Vec<PaymentAsset>,
    pub quote_api_base: String,
    pub quote_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionSettings {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub items: Vec<ItemSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemSettings {
    pub label: String,
    pub price: Price,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("shop config file {0} does not exist")]
    MissingFile(PathBuf),
    #[error("failed to load shop settings: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("at least one region is required")]
    NoRegions,
    #[error("at least one payment asset is required")]
    NoAssets,
    #[error("region '{id}': {reason}")]
    InvalidRegion { id: String, reason: String },
    #[error("item '{label}' in region '{region}': {reason}")]
    InvalidItem {
        region: String,
        label: String,
        reason: String,
    },
    #[error("payment asset '{symbol}': {reason}")]
    InvalidAsset { symbol: String, reason: String },
    #[error("quote_api_base '{0}' is not a valid URL")]
    InvalidQuoteApi(String),
    #[error("quote_timeout_secs must be greater than zero")]
    InvalidQuoteTimeout,
    #[error("buttons for '{context}' cannot be encoded: {source}")]
    Token {
        context: String,
        #[source]
        source: TokenError,
    },
}

impl ShopSettings {
    /// Layers: built-in defaults, then the optional TOML file, then `SHOP_*` variables.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Toml::string(DEFAULT_SHOP_TOML));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["config_path"]))
    }

    /// Loads and validates settings.
    ///
    /// # Errors
    /// Returns an error if the file is missing or malformed, or if any region,
    /// item or asset would produce buttons that cannot be encoded.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(SettingsError::MissingFile(path.to_path_buf()));
            }
        }
        let settings: Self = Self::figment(path).extract().map_err(Box::new)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Built-in defaults only, ignoring files and environment.
    pub fn defaults() -> Result<Self, SettingsError> {
        let settings: Self = Figment::from(Toml::string(DEFAULT_SHOP_TOML))
            .extract()
            .map_err(Box::new)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.regions.is_empty() {
            return Err(SettingsError::NoRegions);
        }
        if self.assets.is_empty() {
            return Err(SettingsError::NoAssets);
        }
        if self.quote_timeout_secs == 0 {
            return Err(SettingsError::InvalidQuoteTimeout);
        }
        if url::Url::parse(&self.quote_api_base).is_err() {
            return Err(SettingsError::InvalidQuoteApi(self.quote_api_base.clone()));
        }

        self.validate_assets()?;

        let mut seen = HashSet::new();
        for region in &self.regions {
            let invalid = |reason: &str| SettingsError::InvalidRegion {
                id: region.id.clone(),
                reason: reason.to_string(),
            };
            if region.id.is_empty() {
                return Err(invalid("id is empty"));
            }
            if region.id.contains(SEPARATOR) {
                return Err(invalid("id contains '_'"));
            }
            if RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(&region.id)) {
                return Err(invalid("id is a reserved word"));
            }
            if !seen.insert(region.id.as_str()) {
                return Err(invalid("duplicate id"));
            }
            if region.label.trim().is_empty() {
                return Err(invalid("label is empty"));
            }

            for item in &region.items {
                if item.label.trim().is_empty() || item.label.contains(SEPARATOR) {
                    return Err(SettingsError::InvalidItem {
                        region: region.id.clone(),
                        label: item.label.clone(),
                        reason: "label must be non-empty and must not contain '_'".to_string(),
                    });
                }
                self.check_item_tokens(&region.id, item)?;
            }
        }

        Ok(())
    }

    fn validate_assets(&self) -> Result<(), SettingsError> {
        for (index, asset) in self.assets.iter().enumerate() {
            let invalid = |reason: &str| SettingsError::InvalidAsset {
                symbol: asset.symbol.clone(),
                reason: reason.to_string(),
            };
            if asset.symbol.is_empty() || asset.symbol.contains(SEPARATOR) {
                return Err(invalid("symbol must be non-empty and must not contain '_'"));
            }
            if asset.name.trim().is_empty() {
                return Err(invalid("name is empty"));
            }
            if asset.quote_id.trim().is_empty() {
                return Err(invalid("quote_id is empty"));
            }
            if find_asset(&self.assets[..index], &asset.symbol).is_some() {
                return Err(invalid("duplicate symbol"));
            }
        }
        Ok(())
    }

    /// Every button an item can lead to must fit into callback data and decode
    /// back into the same step.
    fn check_item_tokens(&self, region: &str, item: &ItemSettings) -> Result<(), SettingsError> {
        let context = format!("{region}/{}", item.label);
        let wrap = |source| SettingsError::Token {
            context: context.clone(),
            source,
        };

        NavToken::Confirm {
            region: region.to_string(),
            item: item.label.clone(),
            price: item.price,
        }
        .encode()
        .map_err(wrap)?;
        NavToken::Pay {
            region: region.to_string(),
            item: item.label.clone(),
            price: item.price,
        }
        .encode()
        .map_err(wrap)?;
        for asset in &self.assets {
            NavToken::PayWithCrypto {
                symbol: asset.symbol.clone(),
                item: item.label.clone(),
                price: item.price,
            }
            .encode()
            .map_err(wrap)?;
        }
        Ok(())
    }

    pub fn build_catalog(&self) -> Catalog {
        Catalog::new(
            self.regions
                .iter()
                .map(|region| {
                    (
                        Region {
                            id: region.id.clone(),
                            label: region.label.clone(),
                        },
                        region
                            .items
                            .iter()
                            .map(|item| CatalogItem::new(item.label.clone(), item.price))
                            .collect(),
                    )
                })
                .collect(),
        )
    }
}

/// Validated shop contents shared by every request.
#[derive(Debug, Clone)]
pub struct Shop {
    settings: ShopSettings,
    catalog: Catalog,
}

impl Shop {
    pub fn new(settings: ShopSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let catalog = settings.build_catalog();
        Ok(Self { settings, catalog })
    }

    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        Self::new(ShopSettings::load(path)?)
    }

    pub fn with_defaults() -> Result<Self, SettingsError> {
        Self::new(ShopSettings::defaults()?)
    }

    pub fn settings(&self) -> &ShopSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn assets(&self) -> &[PaymentAsset] {
        &self.settings.assets
    }

    pub fn find_asset(&self, symbol: &str) -> Option<&PaymentAsset> {
        find_asset(&self.settings.assets, symbol)
    }

    pub fn quote_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.quote_timeout_secs)
    }
}
