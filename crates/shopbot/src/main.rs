use anyhow::Result;
use dotenvy::dotenv;
use std::path::Path;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;

use shopbot::cli::{Cli, Commands};
use shopbot::telegram::{create_bot, run_webhook, schema, setup_bot_commands, HandlerDeps};
use shopcore::core::{config, init_logger, log_shop_configuration, metrics};
use shopcore::pricing::{CoinGeckoClient, PriceProvider};
use shopcore::shop::{quote_asset, Price, Shop};

/// Main entry point for the shop bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, shop settings, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Log panics instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // Load environment variables from .env if present
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run { webhook }) => {
            log::info!("Running bot (webhook: {})", webhook);
            run_bot(webhook).await
        }
        Some(Commands::Quote { symbol, usd }) => run_quote(&symbol, usd).await,
        None => {
            log::info!("No command given, running bot with long polling");
            run_bot(false).await
        }
    }
}

fn load_shop() -> Result<Shop> {
    let path = config::SHOP_CONFIG_PATH.as_deref().map(Path::new);
    match path {
        Some(path) => log::info!("Loading shop settings from {}", path.display()),
        None => log::info!("SHOP_CONFIG_PATH not set, using built-in shop settings"),
    }
    Ok(Shop::load(path)?)
}

async fn run_bot(use_webhook: bool) -> Result<()> {
    log::info!("Starting bot...");

    // Initialize metrics registry
    metrics::init_metrics();

    let shop = Arc::new(load_shop()?);
    log_shop_configuration(&shop);

    let prices: Arc<dyn PriceProvider> = Arc::new(CoinGeckoClient::from_settings(shop.settings())?);
    let bot = create_bot()?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let handler = schema(HandlerDeps::new(shop, prices));

    if use_webhook {
        let Some(webhook_url) = config::WEBHOOK_URL.as_deref() else {
            anyhow::bail!("--webhook requires WEBHOOK_URL");
        };
        let url = url::Url::parse(webhook_url).map_err(|e| anyhow::anyhow!("Invalid WEBHOOK_URL: {}", e))?;
        log::info!("Starting bot in webhook mode at {}", url);
        return run_webhook(bot, handler, url).await;
    }

    // Long polling mode (default)
    log::info!("Starting bot in long polling mode");
    let _ = bot.delete_webhook().await;

    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();
    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}

/// Prints a live quote the way the bot's final screen computes it.
async fn run_quote(symbol: &str, usd: Price) -> Result<()> {
    let shop = load_shop()?;
    let asset = shop
        .find_asset(symbol)
        .ok_or_else(|| anyhow::anyhow!("Unsupported asset '{}'", symbol))?;

    let client = CoinGeckoClient::from_settings(shop.settings())?;
    let quote = quote_asset(&shop, &client, asset, usd).await?;

    println!(
        "{} = {} {} (1 {} = ${})",
        usd, quote.crypto_amount, asset.symbol, asset.symbol, quote.crypto_unit_price
    );
    if asset.payout_address.is_empty() {
        println!("Payout address: not configured");
    } else {
        println!("Payout address: {}", asset.payout_address);
    }
    Ok(())
}
