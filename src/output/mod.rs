//! Output generation
//!
//! Every format is an `OutputGenerator` that renders a finished
//! `StructureModel` into an `OutputDocument`. Generators are looked up by
//! name through the `GeneratorRegistry` and written by `writer`.
//!
//! # Module Structure
//!
//! - `config` - Render context handed to every generator
//! - `utils` - Shared helpers (byte formatting, HTML escaping)
//! - `tree` - Tree-text (markdown) document
//! - `json` - JSON document with statistics
//! - `html` - Self-contained HTML page
//! - `consolidated` - All source files inlined into one document
//! - `console` - Colored tree printed to the terminal
//! - `registry` - Format name lookup
//! - `writer` - Parallel rendering and file output

mod config;
mod consolidated;
mod console;
mod html;
mod json;
mod registry;
mod tree;
mod utils;
mod writer;

use crate::error::Result;
use crate::tree::StructureModel;

// Re-export public types and functions
pub use config::RenderContext;
pub use consolidated::{ConsolidatedGenerator, MAX_INLINED_FILE_SIZE, clean_content};
pub use console::ConsolePrinter;
pub use html::HtmlGenerator;
pub use json::{JsonDocument, JsonGenerator, JsonItem, JsonStatistics};
pub use registry::{GeneratorFactory, GeneratorRegistry};
pub use tree::TreeTextGenerator;
pub use utils::{escape_html, format_bytes};
pub use writer::{FormatOutcome, OutputTarget, render_formats, write_documents};

/// A rendered document, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    pub content: String,
    /// Appended to the output base name, without the leading dot
    pub extension: String,
    pub format_name: String,
}

/// One output format.
///
/// Generators only read the model and context, so several can render the
/// same walk concurrently.
pub trait OutputGenerator: Send + Sync {
    /// Render the model. Failures inside the document (unreadable files in
    /// the consolidated format) are recorded inline, not returned.
    fn generate(&self, model: &StructureModel, ctx: &RenderContext) -> Result<OutputDocument>;

    fn file_extension(&self) -> &'static str;

    fn format_name(&self) -> &'static str;

    /// Names this generator answers to, lower-case.
    fn aliases(&self) -> &'static [&'static str];

    /// Case-insensitive, whitespace-trimmed alias match.
    fn supports_format(&self, name: &str) -> bool {
        let name = name.trim();
        self.aliases().iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Wrap rendered content with this generator's extension and name.
    fn document(&self, content: String) -> OutputDocument {
        OutputDocument {
            content,
            extension: self.file_extension().to_string(),
            format_name: self.format_name().to_string(),
        }
    }
}
