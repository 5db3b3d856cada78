use once_cell::sync::Lazy;
use regex::Regex;

use super::message::MessageBuilder;
use crate::{errors::AppResult, models::feed_item::FeedEntry};

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

/// Renders a batch of new entries into one message. Returns `None` when the
/// composed body is empty, in which case nothing should be sent.
pub fn compose_report(title: &str, entries: &[FeedEntry]) -> AppResult<Option<String>> {
    let mut body = String::new();
    for entry in entries {
        body.push_str(&entry_block(entry)?);
    }
    if body.is_empty() {
        return Ok(None);
    }
    decorate(title, &body).map(Some)
}

pub fn clean_description(description: &str) -> String {
    let description = description.replace("<br />", "\n");
    HTML_TAG.replace_all(&description, "").into_owned()
}

fn entry_block(entry: &FeedEntry) -> AppResult<String> {
    MessageBuilder::new()
        .with_body("[")
        .with_body(&entry.published_at)
        .with_body("] ")
        .with_body(&entry.title)
        .with_body("\n")
        .with_body(&clean_description(&entry.description))
        .with_body("\n\n")
        .build()
}

fn decorate(title: &str, body: &str) -> AppResult<String> {
    let body = body.strip_suffix('\n').unwrap_or(body);
    MessageBuilder::new()
        .begin_info()?
        .begin_title()?
        .with_body(title)
        .end_title()?
        .with_body(body)
        .end_info()?
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_is_suppressed() {
        assert_eq!(compose_report("News", &[]).unwrap(), None);
    }

    #[test]
    fn test_single_entry_report() {
        let entries = [FeedEntry::new("A", "t1", "<p>Hello<br />world</p>")];
        let report = compose_report("News", &entries).unwrap().unwrap();
        assert_eq!(
            report,
            "[info][title]News[/title][t1] A\nHello\nworld\n[/info]"
        );
    }

    #[test]
    fn test_entries_kept_in_given_order() {
        let entries = [FeedEntry::new("B", "t2", "b"), FeedEntry::new("A", "t1", "")];
        let report = compose_report("T", &entries).unwrap().unwrap();
        assert_eq!(report, "[info][title]T[/title][t2] B\nb\n\n[t1] A\n\n[/info]");
    }

    #[test]
    fn test_clean_description() {
        assert_eq!(clean_description("<a href=\"x\">link</a> &amp; text"), "link &amp; text");
        assert_eq!(clean_description("one<br />two<br/>three"), "one\ntwothree");
        assert_eq!(clean_description("no tags"), "no tags");
    }
}
