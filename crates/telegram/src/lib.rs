//! Telegram gateway for VoiceCart.
//!
//! - **Wire types** (`update`) — inbound update/message envelopes
//! - **Bot API** (`api`) — outbound sendMessage / webhook management
//! - **Commands** (`commands`) — slash-command classification
//! - **Formatting** (`format`) — HTML reply builders
//! - **Handler** (`handler`) — routes updates over the session store and
//!   falls back to the intent engine for free text
//!
//! The handler produces `Reply` values; transports (the webhook server)
//! own delivery and its error handling.

pub mod api;
pub mod commands;
pub mod format;
pub mod handler;
pub mod update;

pub use api::{BotApi, GatewayError};
pub use commands::{parse_bot_command, BotCommand};
pub use format::{InlineKeyboard, Reply};
pub use handler::{HandlerError, UpdateHandler};
pub use update::{Chat, Message, Update, User};
