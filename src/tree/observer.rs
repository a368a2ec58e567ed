//! Walk observers
//!
//! The walker reports every emitted entry to a `WalkObserver`. Observers
//! only watch: nothing they do feeds back into the model.

use super::entry::Entry;
use super::model::WalkCounters;

/// Callback for progress reporting - receives each entry as it is emitted.
pub trait WalkObserver {
    fn on_entry_visited(&mut self, entry: &Entry, line: &str, counters: &WalkCounters);

    fn on_walk_finished(&mut self, _counters: &WalkCounters) {}
}

/// Observer used when animation is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl WalkObserver for NoopObserver {
    fn on_entry_visited(&mut self, _entry: &Entry, _line: &str, _counters: &WalkCounters) {}
}
