//! Tree-text document
//!
//! This module provides `TreeTextGenerator` which renders the walk's
//! precomputed visual lines under a short header, in the style of `tree`.

use crate::error::Result;
use crate::icons::directory_icon;
use crate::tree::StructureModel;

use super::config::RenderContext;
use super::{OutputDocument, OutputGenerator};

const RULE_WIDTH: usize = 60;

/// Generator for the `markdown` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeTextGenerator;

impl OutputGenerator for TreeTextGenerator {
    fn generate(&self, model: &StructureModel, ctx: &RenderContext) -> Result<OutputDocument> {
        let mut output = String::new();
        output.push_str(&format!("Project Structure: {}\n", model.root_name()));
        output.push_str(&format!("Path: {}\n", model.root_path().display()));
        if ctx.include_timestamp() {
            output.push_str(&format!("Generated at: {}\n", ctx.timestamp()));
        }
        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push_str("\n\n");

        output.push_str(&render_tree(model));
        output.push('\n');
        output.push_str(&summary_line(model));
        output.push('\n');

        Ok(self.document(output))
    }

    fn file_extension(&self) -> &'static str {
        "md"
    }

    fn format_name(&self) -> &'static str {
        "Markdown"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["markdown", "md", "tree"]
    }
}

/// The root line followed by one visual line per entry, newline-terminated.
pub(crate) fn render_tree(model: &StructureModel) -> String {
    let mut output = format!("{} {}\n", directory_icon(model.root_name()), model.root_name());
    for line in model.lines() {
        output.push_str(line);
        output.push('\n');
    }
    output
}

/// `N directories, M files`
pub(crate) fn summary_line(model: &StructureModel) -> String {
    format!(
        "{} directories, {} files",
        model.folder_count(),
        model.file_count()
    )
}
