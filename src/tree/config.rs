//! Configuration types for tree walkers

use crate::config::Config;

/// Configuration for tree walking behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Deepest entry depth whose children are still listed; `None` is unlimited.
    /// Root's direct children are depth 0.
    pub max_depth: Option<usize>,
    /// Record file sizes on file entries
    pub compute_sizes: bool,
}

impl WalkerConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_depth: config.max_depth(),
            compute_sizes: config.statistics.calculate_file_size,
        }
    }

    /// Whether a directory entry at `depth` gets its children listed.
    pub fn descends_at(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }
}
