//! Telegram bot handler tree configuration
//!
//! The same schema is used by the polling dispatcher and the webhook server.

mod commands;
mod schema;
mod types;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
