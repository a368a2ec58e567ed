//! Render context shared by all generators

use chrono::{DateTime, Local};

use crate::config::Config;
use crate::tree::IgnorePolicy;

/// Everything a generator may read besides the model.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a Config,
    /// The rule snapshot the walk used; the consolidated format reuses it
    pub policy: &'a IgnorePolicy,
    /// One timestamp for every format of a run
    pub generated_at: DateTime<Local>,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config, policy: &'a IgnorePolicy) -> Self {
        Self {
            config,
            policy,
            generated_at: Local::now(),
        }
    }

    pub fn with_timestamp(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn include_timestamp(&self) -> bool {
        self.config.output.include_timestamp
    }

    /// `2024-03-09 14:05:07`
    pub fn timestamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// `09/03/2024 14:05:07`, used by the consolidated document
    pub fn timestamp_dmy(&self) -> String {
        self.generated_at.format("%d/%m/%Y %H:%M:%S").to_string()
    }
}
