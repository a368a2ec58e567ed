//! Configuration loaded from a TOML file
//!
//! Every field has a default, so a partial file (or no file at all) is valid.
//! The value is built once at startup and handed to the walker, the ignore
//! policy and the generators; nothing reads it through a global.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralSettings,
    pub filters: FilterSettings,
    pub output: OutputSettings,
    pub statistics: StatisticsSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Output base path; relative paths resolve against the walk root.
    pub default_output_path: String,
    pub show_animation: bool,
    /// Pause after each visited entry in animated mode, in milliseconds.
    pub animation_delay_ms: u64,
    /// Negative means unlimited.
    pub max_depth: i32,
    pub include_hidden_files: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            default_output_path: "project-structure.md".to_string(),
            show_animation: true,
            animation_delay_ms: 50,
            max_depth: -1,
            include_hidden_files: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub ignore_folders: Vec<String>,
    pub ignore_files: Vec<String>,
    pub ignore_extensions: Vec<String>,
    pub custom_ignore_patterns: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            ignore_folders: strings(&[
                ".git",
                ".vs",
                ".vscode",
                "bin",
                "obj",
                "packages",
                "node_modules",
                ".idea",
                "Debug",
                "Release",
                "target",
                "__pycache__",
                ".pytest_cache",
                "dist",
                "build",
            ]),
            ignore_files: strings(&["Thumbs.db", ".DS_Store", "desktop.ini", "*.tmp", "*.log"]),
            ignore_extensions: strings(&[".exe", ".dll", ".pdb", ".cache", ".suo", ".user"]),
            custom_ignore_patterns: strings(&["**/node_modules/**", "**/bin/Debug/**", "**/obj/**"]),
        }
    }
}

impl FilterSettings {
    /// Settings with every list empty: nothing is excluded except hidden files.
    pub fn empty() -> Self {
        Self {
            ignore_folders: Vec::new(),
            ignore_files: Vec::new(),
            ignore_extensions: Vec::new(),
            custom_ignore_patterns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Requested output formats, in order.
    pub formats: Vec<String>,
    pub include_timestamp: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            formats: strings(&["markdown", "json"]),
            include_timestamp: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsSettings {
    pub calculate_file_size: bool,
}

impl Default for StatisticsSettings {
    fn default() -> Self {
        Self {
            calculate_file_size: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&text).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> std::result::Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }

    /// Maximum walk depth, `None` when unlimited.
    pub fn max_depth(&self) -> Option<usize> {
        usize::try_from(self.general.max_depth).ok()
    }

    pub fn animation_delay(&self) -> Duration {
        Duration::from_millis(self.general.animation_delay_ms)
    }

    /// Resolve the output base path against the walk root.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        let configured = PathBuf::from(&self.general.default_output_path);
        if configured.is_absolute() {
            configured
        } else {
            root.join(configured)
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
