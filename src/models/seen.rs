use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::errors::{AppError, AppResult};

static LEDGER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^# (.*) --- <<(.*)>>$").expect("ledger line pattern is valid")
});

/// Identity of a feed entry across polls. Compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryIdentity {
    pub title: String,
    pub published_at: String,
}

impl EntryIdentity {
    pub fn new(title: impl Into<String>, published_at: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            published_at: published_at.into(),
        }
    }

    /// Parses `# <published_at> --- <<title>>`.
    pub fn parse_ledger_line(line: &str) -> AppResult<Self> {
        let captures = LEDGER_LINE
            .captures(line)
            .ok_or_else(|| AppError::format(line))?;
        Ok(Self::new(&captures[2], &captures[1]))
    }

    pub fn to_ledger_line(&self) -> String {
        format!("# {} --- <<{}>>", self.published_at, self.title)
    }
}

/// Previously notified entries, newest first.
///
/// Duplicates are allowed; nothing here enforces uniqueness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    entries: Vec<EntryIdentity>,
}

impl SeenSet {
    pub fn new(entries: Vec<EntryIdentity>) -> Self {
        Self { entries }
    }

    pub fn contains(&self, identity: &EntryIdentity) -> bool {
        self.entries.iter().any(|seen| seen == identity)
    }

    pub fn entries(&self) -> &[EntryIdentity] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a new set with `newer` ahead of every existing entry.
    pub fn prepend(&self, newer: Vec<EntryIdentity>) -> Self {
        let mut entries = newer;
        entries.extend(self.entries.iter().cloned());
        Self { entries }
    }

    /// Loads a ledger file. A missing file is an empty set; any malformed
    /// line fails the whole load.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let text = match fs::read_to_string(path.as_ref()) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        let entries = text
            .lines()
            .map(EntryIdentity::parse_ledger_line)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Replaces the ledger file with one line per entry, via a temp file in
    /// the same directory that is renamed over the target.
    pub fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(&entry.to_ledger_line());
            text.push('\n');
        }

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| AppError::Io(e.error))?;
        Ok(())
    }
}
