//! Shopbot - Telegram front end of the gift card shop
//!
//! All shop logic lives in `shopcore`; this crate only moves updates in and
//! screens out:
//! - `telegram`: bot creation, commands, handler tree, keyboards, webhook server
//! - `cli`: command line interface of the binary

pub mod cli;
pub mod telegram;

pub use telegram::{create_bot, schema, setup_bot_commands, Bot, HandlerDeps, HandlerError};
