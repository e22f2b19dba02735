use shopcore::pricing::PriceProvider;
use shopcore::shop::{navigate, Inbound, Outbound, Shop};
use teloxide::prelude::*;

use super::helpers::{edit_screen, send_screen};
use crate::telegram::Bot;

/// Handles a tap on any shop button.
///
/// Answers the callback query, runs the navigation engine and delivers its
/// single outbound message: an edit of the tapped message, or a new message
/// when the tapped message is no longer accessible.
pub async fn handle_shop_callback(
    bot: &Bot,
    q: CallbackQuery,
    shop: &Shop,
    prices: &dyn PriceProvider,
) -> ResponseResult<()> {
    // Stops the loading spinner; a stale query must not block navigation.
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        log::warn!("Failed to answer callback query {:?}: {}", q.id, e);
    }

    let Some(data) = q.data.as_deref() else {
        log::debug!("Callback query {:?} without data", q.id);
        return Ok(());
    };

    let outbound = navigate(shop, prices, &Inbound::Callback(data.to_string())).await;
    let chat_id = q
        .message
        .as_ref()
        .map_or_else(|| ChatId::from(q.from.id), |message| message.chat().id);

    match (outbound, q.regular_message()) {
        (Outbound::Edit(screen), Some(message)) => edit_screen(bot, chat_id, message.id, &screen).await,
        (outbound, _) => send_screen(bot, chat_id, outbound.screen()).await,
    }
}
