use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_TITLE: &str = "RSS情報をお送りします";

/// Chat room identifier, as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One feed forwarded to a set of rooms, with its own ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(rename = "rss_url")]
    pub feed_url: String,
    #[serde(rename = "last_rss_status_path")]
    pub ledger_path: String,
    pub rooms: Vec<RoomId>,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}
