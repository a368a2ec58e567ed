//! Animated progress display for the walk
//!
//! `ProgressObserver` draws each tree line above an `indicatif` progress bar
//! as the walker emits it, pausing for the configured delay. It only reads
//! what the walker reports; the model comes out the same with or without it.

use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::tree::{Entry, WalkCounters, WalkObserver};

const BAR_TEMPLATE: &str =
    "[{elapsed_precise}] {bar:30.blue} {pos}/{len} {prefix:.bold} {msg}";

/// Walk observer that animates the tree in the terminal.
pub struct ProgressObserver {
    bar: ProgressBar,
    delay: Duration,
}

impl ProgressObserver {
    pub fn new(root_line: &str, delay: Duration) -> Self {
        Self::with_bar(ProgressBar::new(0), root_line, delay)
    }

    /// Observer drawing nowhere, for tests.
    pub fn hidden(delay: Duration) -> Self {
        Self::with_bar(ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden()), "", delay)
    }

    fn with_bar(bar: ProgressBar, root_line: &str, delay: Duration) -> Self {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ ");
        bar.set_style(style);
        bar.set_prefix("scanning");
        if !root_line.is_empty() {
            bar.println(root_line);
        }
        Self { bar, delay }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl WalkObserver for ProgressObserver {
    fn on_entry_visited(&mut self, _entry: &Entry, line: &str, counters: &WalkCounters) {
        self.bar.set_length(counters.total_expected.max(counters.processed) as u64);
        self.bar.set_position(counters.processed as u64);
        self.bar.set_message(format!(
            "{} directories, {} files",
            counters.folders, counters.files
        ));
        self.bar.println(line);

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }

    fn on_walk_finished(&mut self, counters: &WalkCounters) {
        self.bar.finish_and_clear();
        self.bar.println(format!(
            "\n{} directories, {} files",
            counters.folders, counters.files
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::test_utils::TestTree;
    use crate::tree::{IgnorePolicy, TreeWalker, WalkerConfig};

    #[test]
    fn test_progress_follows_walk() {
        let tree = TestTree::new();
        tree.add_file("src/a.rs", "");
        tree.add_file("src/b.rs", "");
        tree.add_file("README.md", "");

        let config = Config::default();
        let policy = IgnorePolicy::from_config(&config);
        let walker = TreeWalker::new(WalkerConfig::from_config(&config), &policy);

        let mut observer = ProgressObserver::hidden(Duration::ZERO);
        let animated = walker.walk_with(tree.path(), &mut observer).unwrap();
        let silent = walker.walk(tree.path()).unwrap();

        assert_eq!(observer.position(), animated.processed_count() as u64);
        assert_eq!(animated.entries(), silent.entries());
        assert_eq!(animated.lines(), silent.lines());
    }
}
