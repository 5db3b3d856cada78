use crate::models::{feed_item::FeedEntry, seen::SeenSet};

#[derive(Debug)]
pub struct FeedDiff {
    /// Entries not present in the seen set, in feed order
    pub new_entries: Vec<FeedEntry>,
    /// New identities followed by every previously seen identity
    pub updated_seen: SeenSet,
}

/// Splits the current feed into new and already-notified entries.
pub fn diff(current: Vec<FeedEntry>, seen: &SeenSet) -> FeedDiff {
    let new_entries: Vec<FeedEntry> = current
        .into_iter()
        .filter(|entry| !seen.contains(&entry.identity()))
        .collect();
    let new_ids = new_entries.iter().map(FeedEntry::identity).collect();

    FeedDiff {
        updated_seen: seen.prepend(new_ids),
        new_entries,
    }
}
