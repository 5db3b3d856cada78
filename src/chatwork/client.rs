use super::types::{ChatworkConfig, MessageId, PostMessageResponse};
use crate::{
    errors::{AppError, AppResult},
    models::{config::Config, subscription::RoomId},
};
use reqwest::Client;

const TOKEN_HEADER: &str = "X-ChatWorkToken";

pub struct ChatworkClient {
    client: Client,
    config: ChatworkConfig,
}

impl ChatworkClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            config: ChatworkConfig::from_config(config),
        }
    }

    /// Posts `message` to `room` and returns the id Chatwork assigned to it.
    pub async fn send_message(&self, room: &RoomId, message: &str) -> AppResult<MessageId> {
        let response = self
            .client
            .post(self.config.room_messages_url(&room.0))
            .header(TOKEN_HEADER, &self.config.api_token)
            .form(&[("body", message)])
            .send()
            .await
            .map_err(|e| AppError::delivery(&room.0, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .map_err(|e| AppError::delivery(&room.0, e))?;
            return Err(AppError::delivery(
                &room.0,
                format!("Chatwork API error {status}: {error_text}"),
            ));
        }

        let parsed: PostMessageResponse = response
            .json()
            .await
            .map_err(|e| AppError::delivery(&room.0, e))?;

        parsed
            .message_id()
            .ok_or_else(|| AppError::delivery(&room.0, "No message_id in Chatwork response"))
    }
}
