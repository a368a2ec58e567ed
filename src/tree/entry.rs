//! Entries produced by a walk

use std::path::PathBuf;

use chrono::{DateTime, Local};

/// What kind of node an entry describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File {
        /// Lower-cased extension including the dot, empty when there is none
        extension: String,
        /// Size in bytes, only present when size computation is enabled
        size: Option<u64>,
    },
    /// Listing a directory's children was refused
    AccessDenied,
    /// Inspecting a node failed for some other reason
    Error { message: String },
}

/// One visited node. Immutable once the walker has emitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub absolute_path: PathBuf,
    /// Relative to the walk root, `/`-separated, unique within a walk
    pub relative_path: String,
    /// 0 for the root's direct children
    pub depth: usize,
    pub kind: EntryKind,
    pub last_modified: Option<DateTime<Local>>,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, EntryKind::AccessDenied | EntryKind::Error { .. })
    }

    /// Extension for files, `None` for anything else.
    pub fn extension(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::File { extension, .. } => Some(extension),
            _ => None,
        }
    }

    pub fn size(&self) -> Option<u64> {
        match &self.kind {
            EntryKind::File { size, .. } => *size,
            _ => None,
        }
    }

    /// Label shown in place of the name for error entries.
    pub fn display_name(&self) -> String {
        match &self.kind {
            EntryKind::AccessDenied => "[Access Denied]".to_string(),
            EntryKind::Error { message } => format!("[Error: {}]", message),
            _ => self.name.clone(),
        }
    }
}

/// Lower-cased extension of `name` with its leading dot, or an empty string.
///
/// Leading-dot names such as `.gitignore` have no extension.
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) if idx + 1 == name.len() => String::new(),
        Some(idx) => name[idx..].to_lowercase(),
    }
}
