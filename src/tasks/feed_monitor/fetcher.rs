use reqwest::Client;

use crate::{
    errors::{AppError, AppResult},
    models::feed_item::FeedEntry,
};

// See: https://stackoverflow.com/a/7001617/5155484
const FEED_ACCEPT: &str = "application/rss+xml, application/rdf+xml, application/atom+xml, application/feed+json, application/xml;q=0.9, text/xml;q=0.8";
const USER_AGENT: &str = concat!("rssbot/", env!("CARGO_PKG_VERSION"));

/// Retrieves and parses feeds. Holds one HTTP client for the process.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    http_client: Client,
}

impl FeedFetcher {
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
        }
    }

    pub async fn fetch(&self, url: &str) -> AppResult<Vec<FeedEntry>> {
        let response = self
            .http_client
            .get(url)
            .header("Accept", FEED_ACCEPT)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| AppError::fetch(url, e))?;

        if !response.status().is_success() {
            log::warn!(
                "Got non-success response for feed {}: {}",
                url,
                response.status()
            );
            return Err(AppError::fetch(
                url,
                format!("HTTP status {}", response.status()),
            ));
        }

        let body = response.bytes().await.map_err(|e| AppError::fetch(url, e))?;
        let entries = parse_entries(url, &body)?;
        log::info!("Got {} entries from feed {}", entries.len(), url);
        Ok(entries)
    }
}

impl Default for FeedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses RSS first, then Atom, then anything else feed-rs accepts.
pub fn parse_entries(url: &str, body: &[u8]) -> AppResult<Vec<FeedEntry>> {
    if let Ok(channel) = rss::Channel::read_from(body) {
        return Ok(channel.items().iter().map(FeedEntry::from_rss_item).collect());
    }

    if let Ok(feed) = atom_syndication::Feed::read_from(body) {
        return Ok(feed.entries().iter().map(FeedEntry::from_atom_entry).collect());
    }

    let parsed = feed_rs::parser::parse(body).map_err(|e| AppError::fetch(url, e))?;
    Ok(parsed
        .entries
        .into_iter()
        .map(FeedEntry::from_feed_rs)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seen::{EntryIdentity, SeenSet};
    use crate::tasks::feed_monitor::diff::diff;
    use crate::test_helpers::rss_document;

    #[test]
    fn test_parse_entries_keeps_feed_order() {
        let body = rss_document(&[
            ("B", "Tue, 07 Sep 2021 10:00:00 +0000", "second"),
            ("A", "Mon, 06 Sep 2021 10:00:00 +0000", "first"),
        ]);
        let entries = parse_entries("http://feed", body.as_bytes()).unwrap();
        let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["B", "A"]);
    }

    #[test]
    fn test_rss_publish_dates_are_kept_verbatim() {
        let body = rss_document(&[
            ("A", "Mon, 06 Sep 2021 16:45:00 GMT", ""),
            ("B", "2021-09-06", ""),
        ]);
        let entries = parse_entries("http://feed", body.as_bytes()).unwrap();
        assert_eq!(entries[0].published_at, "Mon, 06 Sep 2021 16:45:00 GMT");
        assert_eq!(entries[1].published_at, "2021-09-06");
    }

    #[test]
    fn test_legacy_ledger_line_still_matches() {
        let body = rss_document(&[("A", "Mon, 06 Sep 2021 16:45:00 GMT", "a")]);
        let entries = parse_entries("http://feed", body.as_bytes()).unwrap();
        let seen = SeenSet::new(vec![EntryIdentity::parse_ledger_line(
            "# Mon, 06 Sep 2021 16:45:00 GMT --- <<A>>",
        )
        .unwrap()]);
        assert!(diff(entries, &seen).new_entries.is_empty());
    }

    #[test]
    fn test_atom_document_is_parsed() {
        let body = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example</title><id>urn:example</id><updated>2024-01-02T03:04:05Z</updated>
  <entry><title>A</title><id>urn:example:1</id><updated>2024-01-02T03:04:05Z</updated></entry>
</feed>"#;
        let entries = parse_entries("http://feed", body.as_bytes()).unwrap();
        assert_eq!(entries, vec![FeedEntry::new("A", "2024-01-02T03:04:05Z", "")]);
    }

    #[test]
    fn test_json_feed_is_parsed() {
        let body = r#"{
            "version": "https://jsonfeed.org/version/1.1",
            "title": "Example",
            "items": [{"id": "1", "title": "A", "content_text": "text", "date_published": "2024-01-02T03:04:05Z"}]
        }"#;
        let entries = parse_entries("http://feed", body.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "A");
        assert_eq!(entries[0].published_at, "2024-01-02T03:04:05Z");
    }

    #[test]
    fn test_parse_garbage_is_fetch_error() {
        let result = parse_entries("http://feed", b"not a feed");
        match result {
            Err(AppError::Fetch { url, .. }) => assert_eq!(url, "http://feed"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
