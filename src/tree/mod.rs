//! Directory tree walking logic
//!
//! This module turns a root directory into a `StructureModel`: a flat,
//! pre-order, directories-first list of entries with one visual tree line
//! per entry. It is organized as:
//!
//! - `filter`: `IgnorePolicy`, deciding which names and paths are skipped
//! - `walker`: `TreeWalker`, the single-threaded traversal
//! - `model`: the accumulated entries and running counters
//! - `observer`: progress callbacks invoked after each emitted entry

mod config;
mod entry;
mod filter;
mod model;
mod observer;
mod walker;

// Re-export public types
pub use config::WalkerConfig;
pub use entry::{Entry, EntryKind, extension_of};
pub use filter::{IgnorePolicy, to_forward_slashes};
pub use model::{StructureModel, WalkCounters};
pub use observer::{NoopObserver, WalkObserver};
pub use walker::TreeWalker;
