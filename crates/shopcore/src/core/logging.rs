//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - A summary of the loaded shop settings at startup

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::shop::Shop;

/// Initialize logger for both console and file output
///
/// Falls back to console-only output when the log file cannot be created,
/// so a read-only filesystem never prevents the bot from starting.
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - A global logger was already installed
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let term = TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    match File::create(log_file_path) {
        Ok(log_file) => {
            CombinedLogger::init(vec![
                term,
                WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
            ])
            .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;
        }
        Err(file_err) => {
            CombinedLogger::init(vec![term]).map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;
            log::warn!(
                "Failed to create log file {}: {}. Logging to console only.",
                log_file_path,
                file_err
            );
        }
    }

    Ok(())
}

/// Logs what the shop will serve, once at startup
pub fn log_shop_configuration(shop: &Shop) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("🛍️  Shop: {}", shop.settings().shop_name);
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for region in shop.catalog().regions() {
        let items = shop.catalog().items_for(&region.id);
        if items.is_empty() {
            log::info!("  {}: no items", region.id);
        } else {
            log::info!("  {}: {} item(s)", region.id, items.len());
        }
    }

    for asset in shop.assets() {
        if asset.payout_address.is_empty() {
            log::warn!("⚠️  {} has no payout address configured", asset.symbol);
        } else {
            log::info!("  {} ({}) → {}", asset.symbol, asset.quote_id, asset.payout_address);
        }
    }

    log::info!(
        "  Quotes: {} (timeout {}s)",
        shop.settings().quote_api_base,
        shop.settings().quote_timeout_secs
    );
}
