//! Treescribe - document a project's directory structure
//!
//! A walk produces a `StructureModel`; generators render it as tree text,
//! JSON, HTML, or a consolidated dump of every source file.

pub mod config;
pub mod error;
pub mod icons;
pub mod language;
pub mod logging;
pub mod output;
pub mod progress;
pub mod project;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Config;
pub use error::{Error, Result};
pub use output::{
    ConsolePrinter, GeneratorRegistry, OutputDocument, OutputGenerator, OutputTarget,
    RenderContext, render_formats, write_documents,
};
pub use progress::ProgressObserver;
pub use project::{ProjectInfo, detect_project};
pub use tree::{
    Entry, EntryKind, IgnorePolicy, NoopObserver, StructureModel, TreeWalker, WalkObserver,
    WalkerConfig,
};
