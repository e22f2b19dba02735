//! How screens reach the Bot API: parse mode, keyboards, idempotent edits
//!
//! Run with: cargo test -p shopbot --test menu_delivery_test

use teloxide::types::{ChatId, MessageId};
use teloxide::{ApiError, RequestError};
use wiremock::matchers::{body_string_contains, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopbot::telegram::{edit_screen, send_screen, Bot};
use shopcore::shop::{screens, Shop};

fn bot_for(server: &MockServer) -> Bot {
    Bot::new("123456:TEST-TOKEN").set_api_url(url::Url::parse(&server.uri()).unwrap())
}

fn api_error(description: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(serde_json::json!({
        "ok": false,
        "error_code": 400,
        "description": description
    }))
}

#[tokio::test]
async fn test_identical_edit_is_success() {
    let telegram = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex("(?i)/editmessagetext$"))
        .respond_with(api_error(
            "Bad Request: message is not modified: specified new message content and reply markup are exactly the same as a current content and reply markup of the message",
        ))
        .expect(2)
        .mount(&telegram)
        .await;

    let bot = bot_for(&telegram);
    let shop = Shop::with_defaults().unwrap();
    let screen = screens::region_list(shop.catalog().regions()).unwrap();

    // A double tap edits the same message into the same screen twice
    for _ in 0..2 {
        let result = edit_screen(&bot, ChatId(42), MessageId(7), &screen).await;
        assert!(result.is_ok(), "unexpected error: {:?}", result);
    }
}

#[tokio::test]
async fn test_other_edit_errors_propagate() {
    let telegram = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex("(?i)/editmessagetext$"))
        .respond_with(api_error("Bad Request: message to edit not found"))
        .mount(&telegram)
        .await;

    let bot = bot_for(&telegram);
    let result = edit_screen(&bot, ChatId(42), MessageId(7), &screens::quote_unavailable()).await;

    assert!(matches!(result, Err(RequestError::Api(ApiError::MessageToEditNotFound))));
}

#[tokio::test]
async fn test_send_uses_html_and_inline_keyboard() {
    let telegram = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex("(?i)/sendmessage$"))
        .and(body_string_contains(r#""parse_mode":"HTML""#))
        .and(body_string_contains(r#""callback_data":"enter_shop""#))
        .and(body_string_contains(r#""chat_id":42"#))
        .respond_with(api_error("Bad Request: chat not found"))
        .expect(1)
        .mount(&telegram)
        .await;

    let bot = bot_for(&telegram);
    let shop = Shop::with_defaults().unwrap();
    let screen = screens::welcome(shop.settings());

    let result = send_screen(&bot, ChatId(42), &screen).await;
    assert!(matches!(result, Err(RequestError::Api(ApiError::ChatNotFound))));
}

#[tokio::test]
async fn test_terminal_edit_sends_no_keyboard() {
    let telegram = MockServer::start().await;

    // Matches only requests that carry a keyboard; none should arrive.
    Mock::given(method("POST"))
        .and(path_regex("(?i)/editmessagetext$"))
        .and(body_string_contains("reply_markup"))
        .respond_with(api_error("Bad Request: message to edit not found"))
        .expect(0)
        .mount(&telegram)
        .await;

    Mock::given(method("POST"))
        .and(path_regex("(?i)/editmessagetext$"))
        .respond_with(api_error(
            "Bad Request: message is not modified: specified new message content and reply markup are exactly the same as a current content and reply markup of the message",
        ))
        .expect(1)
        .mount(&telegram)
        .await;

    let bot = bot_for(&telegram);
    let result = edit_screen(&bot, ChatId(42), MessageId(7), &screens::quote_unavailable()).await;
    assert!(result.is_ok());
}
