//! Telegram update envelopes — the gateway's wire contract, owned by the
//! external protocol.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_minimal_message_update() {
        let raw = r#"{
            "update_id": 42,
            "message": {
                "message_id": 7,
                "from": {"id": 99, "first_name": "Asha", "username": "asha_k"},
                "chat": {"id": 99},
                "text": "show me breakfast items"
            }
        }"#;

        let update: Update = serde_json::from_str(raw).expect("decode update");
        let message = update.message.expect("message");
        assert_eq!(update.update_id, 42);
        assert_eq!(message.chat.id, 99);
        assert_eq!(message.text.as_deref(), Some("show me breakfast items"));
        assert_eq!(message.from.unwrap().first_name, "Asha");
    }

    #[test]
    fn tolerates_updates_without_a_message() {
        let update: Update = serde_json::from_str(r#"{"update_id": 1}"#).expect("decode");
        assert!(update.message.is_none());
    }

    #[test]
    fn tolerates_messages_without_text() {
        let raw = r#"{"update_id": 2, "message": {"message_id": 1, "chat": {"id": 5}}}"#;
        let update: Update = serde_json::from_str(raw).expect("decode");
        assert!(update.message.unwrap().text.is_none());
    }
}
