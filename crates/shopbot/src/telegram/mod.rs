//! Telegram bot integration and handlers

pub mod bot;
pub mod handlers;
pub mod menu;
pub mod webhook;

/// Bot type used by every handler
pub type Bot = teloxide::Bot;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps, HandlerError};
pub use menu::{edit_screen, handle_shop_callback, inline_keyboard, send_screen};
pub use webhook::{run_webhook, service_router};
