//! TreeWalker - builds the structure model for a root directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::error::{Error, Result};
use crate::icons::{ACCESS_DENIED_ICON, ERROR_ICON, directory_icon, file_icon};

use super::config::WalkerConfig;
use super::entry::{Entry, EntryKind, extension_of};
use super::filter::IgnorePolicy;
use super::model::StructureModel;
use super::observer::{NoopObserver, WalkObserver};

/// A surviving child of a directory listing, not yet inspected.
#[derive(Debug)]
struct Child {
    name: String,
    path: PathBuf,
    relative: String,
    is_dir: bool,
    is_symlink: bool,
}

/// Single-threaded, pre-order, directories-first tree walker.
///
/// The walker never aborts below the root: unreadable directories and nodes
/// that cannot be inspected become error entries and the walk goes on.
pub struct TreeWalker<'a> {
    config: WalkerConfig,
    policy: &'a IgnorePolicy,
}

impl<'a> TreeWalker<'a> {
    pub fn new(config: WalkerConfig, policy: &'a IgnorePolicy) -> Self {
        Self { config, policy }
    }

    /// Walk `root` without progress reporting.
    pub fn walk(&self, root: &Path) -> Result<StructureModel> {
        self.walk_with(root, &mut NoopObserver)
    }

    /// Walk `root`, reporting every emitted entry to `observer`.
    ///
    /// The observer has no influence on the produced model.
    pub fn walk_with<O: WalkObserver + ?Sized>(
        &self,
        root: &Path,
        observer: &mut O,
    ) -> Result<StructureModel> {
        let root = resolve_root(root)?;
        let children = self
            .list_children(&root, "")
            .map_err(|e| Error::io(&root, e))?;

        let total_expected = self.count_expected(&children, 0);
        let name = root_name(&root);
        debug!(root = %root.display(), total_expected, "starting walk");

        let mut model = StructureModel::new(root, name, total_expected);
        self.visit_children(children, 0, "", &mut model, observer);

        observer.on_walk_finished(&model.counters());
        Ok(model)
    }

    fn visit_children<O: WalkObserver + ?Sized>(
        &self,
        children: Vec<Child>,
        depth: usize,
        prefix: &str,
        model: &mut StructureModel,
        observer: &mut O,
    ) {
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            let is_last = i + 1 == count;
            self.visit(&child, depth, prefix, is_last, model, observer);
        }
    }

    fn visit<O: WalkObserver + ?Sized>(
        &self,
        child: &Child,
        depth: usize,
        prefix: &str,
        is_last: bool,
        model: &mut StructureModel,
        observer: &mut O,
    ) {
        let connector = if is_last { "└── " } else { "├── " };

        let entry = match self.inspect(child, depth) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(path = %child.path.display(), error = %e, "cannot inspect node");
                Entry {
                    name: child.name.clone(),
                    absolute_path: child.path.clone(),
                    relative_path: child.relative.clone(),
                    depth,
                    kind: EntryKind::Error {
                        message: e.to_string(),
                    },
                    last_modified: None,
                }
            }
        };

        let descend = entry.is_dir() && !child.is_symlink && self.config.descends_at(depth);
        let line = format!("{}{}{} {}", prefix, connector, icon_for(&entry), entry.display_name());
        emit(model, observer, entry, line);

        if !descend {
            return;
        }

        let child_prefix = calculate_child_prefix(prefix, is_last);
        match self.list_children(&child.path, &child.relative) {
            Ok(grandchildren) => {
                self.visit_children(grandchildren, depth + 1, &child_prefix, model, observer)
            }
            Err(e) => {
                debug!(path = %child.path.display(), error = %e, "cannot list directory");
                emit_listing_error(model, observer, child, depth + 1, &child_prefix, &e);
            }
        }
    }

    /// Inspect one node. Symlinks are classified by their target; a broken
    /// link is reported as a file without size.
    fn inspect(&self, child: &Child, depth: usize) -> io::Result<Entry> {
        let metadata = match fs::metadata(&child.path) {
            Ok(m) => Some(m),
            Err(_) if child.is_symlink => None,
            Err(e) => return Err(e),
        };

        let last_modified = metadata
            .as_ref()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Local>::from);

        let kind = match &metadata {
            Some(m) if m.is_dir() => EntryKind::Directory,
            _ => EntryKind::File {
                extension: extension_of(&child.name),
                size: if self.config.compute_sizes {
                    metadata.as_ref().map(|m| m.len())
                } else {
                    None
                },
            },
        };

        Ok(Entry {
            name: child.name.clone(),
            absolute_path: child.path.clone(),
            relative_path: child.relative.clone(),
            depth,
            kind,
            last_modified,
        })
    }

    /// Read, filter, and sort directory entries: directories first, then
    /// files, each group by case-insensitive name.
    fn list_children(&self, dir: &Path, relative: &str) -> io::Result<Vec<Child>> {
        let mut children = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    debug!(dir = %dir.display(), error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().to_string();
            let child_relative = if relative.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", relative, name)
            };
            if self.policy.must_ignore_relative(&child_relative) {
                continue;
            }

            let path = entry.path();
            let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
            let is_dir = fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);
            children.push(Child {
                name,
                path,
                relative: child_relative,
                is_dir,
                is_symlink,
            });
        }

        children.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(children)
    }

    /// Counting pre-pass used for progress totals. Applies the same filter
    /// and depth rules as the walk; unreadable directories count nothing.
    fn count_expected(&self, children: &[Child], depth: usize) -> usize {
        children
            .iter()
            .map(|child| {
                let nested = if child.is_dir && !child.is_symlink && self.config.descends_at(depth) {
                    self.list_children(&child.path, &child.relative)
                        .map(|grandchildren| self.count_expected(&grandchildren, depth + 1))
                        .unwrap_or(0)
                } else {
                    0
                };
                1 + nested
            })
            .sum()
    }
}

fn emit<O: WalkObserver + ?Sized>(
    model: &mut StructureModel,
    observer: &mut O,
    entry: Entry,
    line: String,
) {
    model.push(entry, line);
    let counters = model.counters();
    if let Some((entry, line)) = model.last() {
        observer.on_entry_visited(entry, line, &counters);
    }
}

/// Record the single child shown under a directory that cannot be listed.
fn emit_listing_error<O: WalkObserver + ?Sized>(
    model: &mut StructureModel,
    observer: &mut O,
    dir: &Child,
    depth: usize,
    child_prefix: &str,
    error: &io::Error,
) {
    let entry = listing_error_entry(dir, depth, error);
    let line = format!(
        "{}└── {} {}",
        child_prefix,
        icon_for(&entry),
        entry.display_name()
    );
    emit(model, observer, entry, line);
}

/// Synthetic child entry recorded when a directory cannot be listed.
fn listing_error_entry(dir: &Child, depth: usize, error: &io::Error) -> Entry {
    let (name, kind) = if error.kind() == io::ErrorKind::PermissionDenied {
        ("[Access Denied]", EntryKind::AccessDenied)
    } else {
        (
            "[Error]",
            EntryKind::Error {
                message: error.to_string(),
            },
        )
    };
    Entry {
        name: name.to_string(),
        absolute_path: dir.path.join(name),
        relative_path: format!("{}/{}", dir.relative, name),
        depth,
        kind,
        last_modified: None,
    }
}

fn icon_for(entry: &Entry) -> &'static str {
    match &entry.kind {
        EntryKind::Directory => directory_icon(&entry.name),
        EntryKind::File { .. } => file_icon(&entry.name),
        EntryKind::AccessDenied => ACCESS_DENIED_ICON,
        EntryKind::Error { .. } => ERROR_ICON,
    }
}

/// Calculate the prefix for child entries
fn calculate_child_prefix(current_prefix: &str, is_last: bool) -> String {
    if is_last {
        format!("{}    ", current_prefix)
    } else {
        format!("{}│   ", current_prefix)
    }
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    let canonical = root.canonicalize().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::RootNotFound(root.to_path_buf())
        } else {
            Error::io(root, e)
        }
    })?;
    if !canonical.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }
    Ok(canonical)
}

/// Last path component, or the whole path for roots such as `/`.
fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| root.display().to_string())
}
