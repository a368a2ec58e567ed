//! The accumulated result of one walk

use std::path::{Path, PathBuf};

use super::entry::{Entry, EntryKind};

/// Running counters, handed to walk observers after every entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkCounters {
    pub folders: usize,
    pub files: usize,
    pub processed: usize,
    /// From the counting pre-pass; only meaningful for progress display
    pub total_expected: usize,
}

/// Entries of one walk in pre-order, with one rendered tree line per entry.
///
/// Only the walker appends; once the walk returns the model is read-only.
#[derive(Debug, Clone)]
pub struct StructureModel {
    root_path: PathBuf,
    root_name: String,
    entries: Vec<Entry>,
    lines: Vec<String>,
    counters: WalkCounters,
}

impl StructureModel {
    pub(crate) fn new(root_path: PathBuf, root_name: String, total_expected: usize) -> Self {
        Self {
            root_path,
            root_name,
            entries: Vec::new(),
            lines: Vec::new(),
            counters: WalkCounters {
                total_expected,
                ..Default::default()
            },
        }
    }

    /// Append an entry with its visual line, updating exactly one counter
    /// (none for error entries) plus the processed count.
    pub(crate) fn push(&mut self, entry: Entry, line: String) {
        match entry.kind {
            EntryKind::Directory => self.counters.folders += 1,
            EntryKind::File { .. } => self.counters.files += 1,
            EntryKind::AccessDenied | EntryKind::Error { .. } => {}
        }
        self.counters.processed += 1;
        self.entries.push(entry);
        self.lines.push(line);
    }

    pub(crate) fn last(&self) -> Option<(&Entry, &str)> {
        Some((self.entries.last()?, self.lines.last()?.as_str()))
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Display name of the root: its last component, or the full path.
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Visual tree lines, parallel to `entries()`.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn counters(&self) -> WalkCounters {
        self.counters
    }

    pub fn folder_count(&self) -> usize {
        self.counters.folders
    }

    pub fn file_count(&self) -> usize {
        self.counters.files
    }

    pub fn error_count(&self) -> usize {
        self.counters.processed - self.counters.folders - self.counters.files
    }

    pub fn processed_count(&self) -> usize {
        self.counters.processed
    }

    pub fn total_expected(&self) -> usize {
        self.counters.total_expected
    }

    /// Deepest entry depth, 0 for an empty walk.
    pub fn max_depth(&self) -> usize {
        self.entries.iter().map(|e| e.depth).max().unwrap_or(0)
    }
}
