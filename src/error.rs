//! Crate-wide error type
//!
//! Only failures that make a whole operation meaningless end up here: a bad
//! walk root, an unknown output format, an unreadable config file, or a
//! failed output write. Anything deeper in the tree is absorbed into the
//! model as an error entry instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The walk root does not exist
    #[error("cannot access '{}': No such file or directory", .0.display())]
    RootNotFound(PathBuf),

    /// The walk root exists but is not a directory
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// I/O failure at a path the operation cannot do without
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Format name not present in the generator registry
    #[error("format '{format}' is not supported. Supported formats: {supported}")]
    UnsupportedFormat { format: String, supported: String },

    /// Configuration file could not be read or parsed
    #[error("invalid configuration '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
