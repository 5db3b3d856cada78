use serde::Deserialize;
use std::fmt;

/// Identifier the Chatwork API assigns to a posted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageId(pub String);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Deserialize)]
pub struct PostMessageResponse {
    pub message_id: Option<serde_json::Value>,
}

impl PostMessageResponse {
    pub fn message_id(&self) -> Option<MessageId> {
        match self.message_id.as_ref()? {
            serde_json::Value::String(id) => Some(MessageId(id.clone())),
            serde_json::Value::Number(id) => Some(MessageId(id.to_string())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatworkConfig {
    pub api_token: String,
    pub api_base_url: String,
}

impl ChatworkConfig {
    pub fn from_config(config: &crate::models::config::Config) -> Self {
        Self {
            api_token: config.api_token.clone(),
            api_base_url: config.api_base_url.clone(),
        }
    }

    pub fn room_messages_url(&self, room: &str) -> String {
        format!(
            "{}/rooms/{}/messages",
            self.api_base_url.trim_end_matches('/'),
            room
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> ChatworkConfig {
        ChatworkConfig {
            api_token: "t".to_string(),
            api_base_url: base.to_string(),
        }
    }

    #[test]
    fn test_room_messages_url() {
        assert_eq!(
            config("https://api.chatwork.com/v1/").room_messages_url("42"),
            "https://api.chatwork.com/v1/rooms/42/messages"
        );
        assert_eq!(
            config("http://127.0.0.1:8080").room_messages_url("42"),
            "http://127.0.0.1:8080/rooms/42/messages"
        );
    }

    #[test]
    fn test_message_id_string_or_number() {
        let parsed: PostMessageResponse = serde_json::from_str(r#"{"message_id": "1234"}"#).unwrap();
        assert_eq!(parsed.message_id(), Some(MessageId("1234".into())));

        let parsed: PostMessageResponse = serde_json::from_str(r#"{"message_id": 99}"#).unwrap();
        assert_eq!(parsed.message_id(), Some(MessageId("99".into())));

        let parsed: PostMessageResponse = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert_eq!(parsed.message_id(), None);

        let parsed: PostMessageResponse = serde_json::from_str(r#"{"message_id": null}"#).unwrap();
        assert_eq!(parsed.message_id(), None);
    }
}
