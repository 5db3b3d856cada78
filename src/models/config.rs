use ring::digest::{digest, SHA1_FOR_LEGACY_USE_ONLY};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use url::Url;

use super::subscription::Subscription;
use crate::errors::{AppError, AppResult};

pub const DEFAULT_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_API_BASE_URL: &str = "https://api.chatwork.com/v1/";

/// Bot configuration, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SHA-1 of the raw file bytes, for change detection only
    pub checksum: String,
    pub api_token: String,
    pub api_base_url: String,
    pub interval_secs: u64,
    pub subscriptions: Vec<Subscription>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    api_token: String,
    #[serde(default)]
    api_base_url: Option<String>,
    #[serde(default)]
    interval: Option<u64>,
    #[serde(default)]
    notify_options: Vec<Subscription>,
}

impl Config {
    /// Reads and parses the config file. A missing file reads as empty
    /// text, which then fails to parse.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let raw = match fs::read(path.as_ref()) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Self::from_bytes(&raw)
    }

    pub fn from_bytes(raw: &[u8]) -> AppResult<Self> {
        let checksum = checksum(raw);
        let file: ConfigFile = serde_json::from_slice(raw)?;

        for sub in &file.notify_options {
            validate_feed_url(&sub.feed_url)?;
        }
        let api_base_url = file
            .api_base_url
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Url::parse(&api_base_url)?;

        Ok(Self {
            checksum,
            api_token: file.api_token,
            api_base_url,
            interval_secs: file.interval.unwrap_or(DEFAULT_INTERVAL_SECS),
            subscriptions: file.notify_options,
        })
    }

    pub fn is_same_config(&self, other: &Config) -> bool {
        self.checksum == other.checksum
    }
}

fn checksum(raw: &[u8]) -> String {
    hex::encode(digest(&SHA1_FOR_LEGACY_USE_ONLY, raw).as_ref())
}

fn validate_feed_url(feed_url: &str) -> AppResult<()> {
    let url = Url::parse(feed_url)?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AppError::Config(format!(
            "unsupported feed URL scheme {scheme:?} in {feed_url}"
        ))),
    }
}
