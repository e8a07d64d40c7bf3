//! Telegram-facing HTTP surface.
//!
//! - `POST /api/telegram`       — webhook ingest (always `200 {"ok":true}`
//!   back to Telegram; processing errors are logged, not surfaced)
//! - `GET  /api/telegram`       — liveness probe for the bot integration
//! - `POST /api/telegram/setup` — register the webhook URL with Telegram
//! - `GET  /api/telegram/setup` — current webhook registration

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};
use uuid::Uuid;

use voicecart_store::MemoryStore;
use voicecart_telegram::{BotApi, Update, UpdateHandler};

#[derive(Clone)]
pub struct WebhookState {
    pub handler: Arc<UpdateHandler<MemoryStore>>,
    pub bot: BotApi,
}

#[derive(Debug, Serialize)]
pub struct SetupResponse {
    pub success: bool,
    pub message: String,
    pub webhook_url: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookError {
    pub error: String,
}

pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/api/telegram", post(ingest).get(status))
        .route("/api/telegram/setup", post(setup_webhook).get(webhook_info))
        .with_state(state)
}

/// Webhook ingest. Telegram retries on non-200, so both handler failures
/// and undecodable payloads are logged and acknowledged, never rejected.
async fn ingest(State(state): State<WebhookState>, body: axum::body::Bytes) -> Json<Value> {
    let correlation_id = Uuid::new_v4().to_string();

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(err) => {
            warn!(
                event_name = "webhook.telegram.undecodable_update",
                correlation_id = %correlation_id,
                error = %err,
                "discarding undecodable telegram update"
            );
            return Json(json!({ "ok": true }));
        }
    };
    let chat_id = update.message.as_ref().map(|message| message.chat.id);

    let reply = match state.handler.handle(&update).await {
        Ok(reply) => reply,
        Err(err) => {
            error!(
                event_name = "webhook.telegram.handler_failed",
                correlation_id = %correlation_id,
                update_id = update.update_id,
                error = %err,
                "failed to route telegram update"
            );
            return Json(json!({ "ok": true }));
        }
    };

    if let (Some(reply), Some(chat_id)) = (reply, chat_id) {
        if let Err(err) =
            state.bot.send_message(chat_id, &reply.text, reply.keyboard.as_ref()).await
        {
            error!(
                event_name = "webhook.telegram.send_failed",
                correlation_id = %correlation_id,
                chat_id,
                error = %err,
                "failed to deliver telegram reply"
            );
        } else {
            info!(
                event_name = "webhook.telegram.replied",
                correlation_id = %correlation_id,
                chat_id,
                "telegram reply delivered"
            );
        }
    }

    Json(json!({ "ok": true }))
}

async fn status() -> Json<Value> {
    Json(json!({
        "status": "VoiceCart Telegram Bot is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn setup_webhook(
    State(state): State<WebhookState>,
    body: axum::body::Bytes,
) -> Result<Json<SetupResponse>, (StatusCode, Json<WebhookError>)> {
    // Missing, malformed, or incomplete bodies all collapse to the same
    // 400 rather than a framework-level rejection.
    let webhook_url = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|body| body.get("webhookUrl").and_then(Value::as_str).map(str::to_owned))
        .filter(|url| !url.is_empty());
    let Some(webhook_url) = webhook_url else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(WebhookError { error: "webhookUrl is required".to_owned() }),
        ));
    };

    match state.bot.set_webhook(&webhook_url).await {
        Ok(()) => {
            info!(
                event_name = "webhook.telegram.registered",
                webhook_url = %webhook_url,
                "telegram webhook registered"
            );
            Ok(Json(SetupResponse {
                success: true,
                message: "Webhook set successfully".to_owned(),
                webhook_url,
            }))
        }
        Err(err) => {
            warn!(
                event_name = "webhook.telegram.registration_failed",
                error = %err,
                "telegram webhook registration failed"
            );
            Err((
                StatusCode::BAD_REQUEST,
                Json(WebhookError { error: format!("Failed to set webhook: {err}") }),
            ))
        }
    }
}

async fn webhook_info(
    State(state): State<WebhookState>,
) -> Result<Json<Value>, (StatusCode, Json<WebhookError>)> {
    match state.bot.webhook_info().await {
        Ok(info) => Ok(Json(json!({ "webhook_info": info, "bot_configured": true }))),
        Err(err) => Err((
            StatusCode::BAD_GATEWAY,
            Json(WebhookError { error: format!("Failed to fetch webhook info: {err}") }),
        )),
    }
}
