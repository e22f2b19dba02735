use shopcore::shop::{Screen, TextFormat};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode};
use teloxide::{ApiError, RequestError};

use crate::telegram::Bot;

/// Inline keyboard for a screen; `None` for a terminal screen.
pub fn inline_keyboard(screen: &Screen) -> Option<InlineKeyboardMarkup> {
    if screen.is_terminal() {
        return None;
    }
    Some(InlineKeyboardMarkup::new(screen.keyboard.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.token.clone()))
            .collect::<Vec<_>>()
    })))
}

pub fn parse_mode(format: TextFormat) -> Option<ParseMode> {
    match format {
        TextFormat::Html => Some(ParseMode::Html),
        TextFormat::Plain => None,
    }
}

/// Sends a screen as a new message.
pub async fn send_screen(bot: &Bot, chat_id: ChatId, screen: &Screen) -> ResponseResult<()> {
    let mut req = bot.send_message(chat_id, screen.text.clone());
    if let Some(mode) = parse_mode(screen.format) {
        req = req.parse_mode(mode);
    }
    if let Some(keyboard) = inline_keyboard(screen) {
        req = req.reply_markup(keyboard);
    }
    req.await?;
    Ok(())
}

/// Replaces the text and buttons of an existing message.
///
/// Editing a message into exactly what it already shows (a double tap) is
/// reported by Telegram as "message is not modified" and counts as success.
pub async fn edit_screen(bot: &Bot, chat_id: ChatId, message_id: MessageId, screen: &Screen) -> ResponseResult<()> {
    let mut req = bot.edit_message_text(chat_id, message_id, screen.text.clone());
    if let Some(mode) = parse_mode(screen.format) {
        req = req.parse_mode(mode);
    }
    // Without reply_markup Telegram drops the old keyboard, which is what a terminal screen wants.
    if let Some(keyboard) = inline_keyboard(screen) {
        req = req.reply_markup(keyboard);
    }

    match req.await {
        Ok(_) => Ok(()),
        Err(RequestError::Api(ApiError::MessageNotModified)) => {
            log::debug!("Message {} in chat {} already up to date", message_id.0, chat_id);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
