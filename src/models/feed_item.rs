use chrono::SecondsFormat;

use super::seen::EntryIdentity;

/// One entry of a fetched feed, in the feed's native order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    /// Publish date exactly as the feed wrote it
    pub published_at: String,
    /// May contain HTML markup
    pub description: String,
}

impl FeedEntry {
    pub fn new(
        title: impl Into<String>,
        published_at: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            published_at: published_at.into(),
            description: description.into(),
        }
    }

    pub fn identity(&self) -> EntryIdentity {
        EntryIdentity::new(self.title.clone(), self.published_at.clone())
    }

    /// RSS 0.9x/1.0/2.0 item. `pubDate` is kept verbatim, falling back to
    /// the first `dc:date`.
    pub fn from_rss_item(item: &rss::Item) -> Self {
        let published_at = item
            .pub_date()
            .map(str::to_string)
            .or_else(|| {
                item.dublin_core_ext()
                    .and_then(|dc| dc.dates().first().cloned())
            })
            .unwrap_or_default();
        let description = item
            .description()
            .or_else(|| item.content())
            .unwrap_or_default();

        Self::from_feed_fields(item.title().unwrap_or_default(), published_at, description)
    }

    /// Atom entry. The date is `published`, else `updated`, written back in
    /// RFC 3339 with its original offset.
    pub fn from_atom_entry(entry: &atom_syndication::Entry) -> Self {
        let published_at = entry
            .published()
            .unwrap_or_else(|| entry.updated())
            .to_rfc3339_opts(SecondsFormat::AutoSi, true);
        let description = entry
            .summary()
            .map(|s| s.as_str())
            .or_else(|| entry.content().and_then(|c| c.value()))
            .unwrap_or_default();

        Self::from_feed_fields(entry.title().as_str(), published_at, description)
    }

    /// Any other format feed-rs understands (JSON Feed).
    pub fn from_feed_rs(entry: feed_rs::model::Entry) -> Self {
        let title = entry.title.map(|t| t.content).unwrap_or_default();
        let published_at = entry
            .published
            .or(entry.updated)
            .map(|p| p.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            .unwrap_or_default();
        let description = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .unwrap_or_default();

        Self::from_feed_fields(&title, published_at, &description)
    }

    fn from_feed_fields(title: &str, published_at: String, description: &str) -> Self {
        Self {
            title: single_line("title", title),
            published_at: single_line("published date", &published_at),
            description: description.to_string(),
        }
    }
}

/// Ledger lines cannot hold line breaks, so they are replaced by spaces.
fn single_line(field: &str, value: &str) -> String {
    if !value.contains(['\n', '\r']) {
        return value.to_string();
    }
    log::warn!("Feed entry {field} {value:?} contains line breaks, replacing them with spaces");
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
