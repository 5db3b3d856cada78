use std::sync::Arc;

use crate::{chatwork::client::ChatworkClient, models::config::Config};

/// The active config and the client built from it. Replaced as a unit.
#[derive(Clone)]
pub struct BotState {
    pub config: Arc<Config>,
    pub client: Arc<ChatworkClient>,
}

impl BotState {
    pub fn new(config: Config) -> Self {
        let client = ChatworkClient::new(&config);
        Self {
            config: Arc::new(config),
            client: Arc::new(client),
        }
    }

    /// Returns a replacement state when `candidate` differs from the
    /// active config, `None` otherwise.
    pub fn updated_with(&self, candidate: Config) -> Option<Self> {
        if self.config.is_same_config(&candidate) {
            None
        } else {
            Some(Self::new(candidate))
        }
    }
}
