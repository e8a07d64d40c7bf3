//! Outbound Telegram Bot API client.
//!
//! Thin wrappers over `sendMessage`, `setWebhook`, and `getWebhookInfo`.
//! No retries here — retry/backoff is the caller's concern.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::format::InlineKeyboard;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("telegram transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("telegram api rejected the call: {0}")]
    Rejected(String),
}

/// Envelope every Bot API method responds with.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    description: Option<String>,
}

impl ApiResponse {
    fn into_result(self) -> Result<Value, GatewayError> {
        if self.ok {
            Ok(self.result.unwrap_or(Value::Null))
        } else {
            Err(GatewayError::Rejected(
                self.description.unwrap_or_else(|| "no description".to_owned()),
            ))
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboard>,
}

#[derive(Debug, Serialize)]
struct SetWebhookRequest<'a> {
    url: &'a str,
    allowed_updates: [&'static str; 1],
}

#[derive(Clone)]
pub struct BotApi {
    http: reqwest::Client,
    base_url: String,
    bot_token: SecretString,
}

impl BotApi {
    pub fn new(base_url: impl Into<String>, bot_token: SecretString) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.into(), bot_token }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.base_url.trim_end_matches('/'),
            self.bot_token.expose_secret()
        )
    }

    /// Send an HTML-formatted reply, optionally with an inline keyboard.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<(), GatewayError> {
        let request = SendMessageRequest { chat_id, text, parse_mode: "HTML", reply_markup: keyboard };
        let response: ApiResponse = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&request)
            .send()
            .await?
            .json()
            .await?;
        response.into_result().map(|_| ())
    }

    /// Register the webhook URL, restricted to message updates.
    pub async fn set_webhook(&self, webhook_url: &str) -> Result<(), GatewayError> {
        let request = SetWebhookRequest { url: webhook_url, allowed_updates: ["message"] };
        let response: ApiResponse = self
            .http
            .post(self.method_url("setWebhook"))
            .json(&request)
            .send()
            .await?
            .json()
            .await?;
        response.into_result().map(|_| ())
    }

    /// Current webhook registration, as reported by Telegram.
    pub async fn webhook_info(&self) -> Result<Value, GatewayError> {
        let response: ApiResponse =
            self.http.get(self.method_url("getWebhookInfo")).send().await?.json().await?;
        response.into_result()
    }
}
