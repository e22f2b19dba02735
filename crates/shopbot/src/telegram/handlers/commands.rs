//! Command handler implementations (/start, /help)

use shopcore::shop::{navigate, Inbound};
use teloxide::prelude::*;
use teloxide::types::Message;
use teloxide::utils::command::BotCommands;

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::menu::send_screen;
use crate::telegram::Bot;

/// Handle /start command: sends the welcome screen as a new message
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let outbound = navigate(&deps.shop, deps.prices.as_ref(), &Inbound::Start).await;
    send_screen(bot, msg.chat.id, outbound.screen()).await?;
    Ok(())
}

/// Handle /help command
pub(super) async fn handle_help_command(bot: &Bot, msg: &Message) -> Result<(), HandlerError> {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}
