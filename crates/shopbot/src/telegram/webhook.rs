//! Webhook HTTP server
//!
//! One listener serves:
//! - `POST <webhook path>` - Telegram updates (teloxide's axum router)
//! - `GET <webhook path>` - (re-)registers the webhook for the requesting host
//! - `/health` - liveness check
//! - `/metrics` - Prometheus metrics in text format, when enabled

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use prometheus::{Encoder, TextEncoder};
use shopcore::core::{config, metrics};
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use tokio::net::TcpListener;
use url::Url;

use super::handlers::HandlerError;
use super::Bot;

#[derive(Clone)]
struct WebhookState {
    bot: Bot,
    path: String,
    secret_token: String,
}

/// Routes served next to the update endpoint.
///
/// # Arguments
/// * `bot` - Bot used to register the webhook
/// * `webhook_path` - Path Telegram posts updates to, e.g. `/telegram_bot`
/// * `secret_token` - Secret the update route checks; re-registration must send the same one
/// * `metrics_enabled` - Whether to expose `/metrics`
pub fn service_router(bot: Bot, webhook_path: &str, secret_token: &str, metrics_enabled: bool) -> Router {
    let state = WebhookState {
        bot,
        path: webhook_path.to_string(),
        secret_token: secret_token.to_string(),
    };

    let mut router = Router::new()
        .route(webhook_path, get(register_webhook_handler))
        .route("/health", get(health_handler));
    if metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }
    router.with_state(Arc::new(state))
}

/// Runs the webhook server and the dispatcher until Ctrl-C.
///
/// # Errors
/// Returns an error if the webhook cannot be set or the listener cannot bind.
pub async fn run_webhook(bot: Bot, handler: UpdateHandler<HandlerError>, webhook_url: Url) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], *config::server::PORT));
    let mut options = webhooks::Options::new(addr, webhook_url.clone());
    let secret_token = options.get_or_gen_secret_token().to_string();
    let (listener, stop_flag, updates_router) = webhooks::axum_to_router(bot.clone(), options).await?;

    let app = updates_router.merge(service_router(
        bot.clone(),
        webhook_url.path(),
        &secret_token,
        *config::metrics::ENABLED,
    ));

    log::info!("Starting webhook server on http://{} for {}", addr, webhook_url);
    log::info!("  {}  - Telegram updates (POST), webhook registration (GET)", webhook_url.path());
    log::info!("  /health - Health check");
    if *config::metrics::ENABLED {
        log::info!("  /metrics - Prometheus metrics");
    }

    let tcp = TcpListener::bind(&addr).await?;
    let server = tokio::spawn(async move { axum::serve(tcp, app).with_graceful_shutdown(stop_flag).await });

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    server.await??;
    log::info!("Webhook server shut down");
    Ok(())
}

/// Handler for GET on the webhook path
///
/// Points Telegram at `https://<Host header><webhook path>` with the secret the
/// update route expects, so updates keep being accepted afterwards.
async fn register_webhook_handler(State(state): State<Arc<WebhookState>>, headers: HeaderMap) -> Response {
    let Some(host) = headers.get(header::HOST).and_then(|value| value.to_str().ok()) else {
        return (StatusCode::BAD_REQUEST, "missing Host header").into_response();
    };

    let url = match Url::parse(&format!("https://{}{}", host, state.path)) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Cannot build webhook URL from host '{}': {}", host, e);
            return (StatusCode::BAD_REQUEST, "invalid Host header").into_response();
        }
    };

    match state
        .bot
        .set_webhook(url.clone())
        .secret_token(state.secret_token.clone())
        .await
    {
        Ok(_) => {
            log::info!("Webhook set to {}", url);
            (StatusCode::OK, "webhook set").into_response()
        }
        Err(e) => {
            log::error!("Failed to set webhook to {}: {}", url, e);
            (StatusCode::BAD_GATEWAY, "failed to set webhook").into_response()
        }
    }
}

/// Handler for /health endpoint
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Handler for /metrics endpoint
async fn metrics_handler() -> Response {
    match metrics::render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, TextEncoder::new().format_type().to_string())],
            body,
        )
            .into_response(),
        Err(e) => {
            log::error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to encode metrics: {}", e)).into_response()
        }
    }
}
