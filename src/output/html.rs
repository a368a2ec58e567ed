//! Self-contained HTML page wrapping the tree rendering

use crate::error::Result;
use crate::tree::StructureModel;

use super::config::RenderContext;
use super::tree::{render_tree, summary_line};
use super::utils::escape_html;
use super::{OutputDocument, OutputGenerator};

const STYLE: &str = r#"    body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2rem; background: #f6f8fa; color: #24292f; }
    header { margin-bottom: 1.5rem; }
    h1 { font-size: 1.6rem; margin: 0 0 0.5rem 0; }
    .meta { color: #57606a; margin: 0.2rem 0; }
    .counters { display: flex; gap: 1rem; margin-top: 1rem; }
    .counter { background: #fff; border: 1px solid #d0d7de; border-radius: 6px; padding: 0.6rem 1rem; }
    .counter strong { display: block; font-size: 1.3rem; }
    pre.tree { background: #fff; border: 1px solid #d0d7de; border-radius: 6px; padding: 1rem; overflow-x: auto; line-height: 1.4; font-family: "SFMono-Regular", Consolas, "Liberation Mono", monospace; }
    footer { color: #57606a; font-size: 0.9rem; }
"#;

/// Generator for the `html` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlGenerator;

impl OutputGenerator for HtmlGenerator {
    fn generate(&self, model: &StructureModel, ctx: &RenderContext) -> Result<OutputDocument> {
        let name = escape_html(model.root_name());
        let path = escape_html(&model.root_path().display().to_string());

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("  <meta charset=\"utf-8\">\n");
        html.push_str(&format!("  <title>Project Structure: {}</title>\n", name));
        html.push_str("  <style>\n");
        html.push_str(STYLE);
        html.push_str("  </style>\n</head>\n<body>\n");

        html.push_str("  <header>\n");
        html.push_str(&format!("    <h1>Project Structure: {}</h1>\n", name));
        html.push_str(&format!("    <p class=\"meta\">Path: {}</p>\n", path));
        if ctx.include_timestamp() {
            html.push_str(&format!(
                "    <p class=\"meta\">Generated at: {}</p>\n",
                ctx.timestamp()
            ));
        }
        html.push_str("    <div class=\"counters\">\n");
        for (label, value) in [
            ("Directories", model.folder_count()),
            ("Files", model.file_count()),
            ("Items", model.processed_count()),
        ] {
            html.push_str(&format!(
                "      <div class=\"counter\"><strong>{}</strong>{}</div>\n",
                value, label
            ));
        }
        html.push_str("    </div>\n  </header>\n");

        html.push_str("  <pre class=\"tree\">");
        html.push_str(&escape_html(&render_tree(model)));
        html.push_str("</pre>\n");

        html.push_str(&format!(
            "  <footer>{}</footer>\n",
            escape_html(&summary_line(model))
        ));
        html.push_str("</body>\n</html>\n");

        Ok(self.document(html))
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn format_name(&self) -> &'static str {
        "HTML"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["html", "htm"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::output::test_support::{fixed_time, walk};
    use crate::test_utils::TestTree;
    use crate::tree::IgnorePolicy;

    #[test]
    #[cfg(unix)]
    fn test_escapes_tree_content() {
        let tree = TestTree::new();
        tree.add_file("a&b.txt", "");
        tree.add_file("<script>.js", "");

        let config = Config::default();
        let model = walk(&tree, &config);
        let policy = IgnorePolicy::from_config(&config);
        let ctx = RenderContext::new(&config, &policy).with_timestamp(fixed_time());
        let doc = HtmlGenerator.generate(&model, &ctx).unwrap();

        assert_eq!(doc.extension, "html");
        assert!(doc.content.contains("a&amp;b.txt"));
        assert!(doc.content.contains("&lt;script&gt;.js"));
        assert!(!doc.content.contains("<script>"));
        assert!(doc.content.contains("Generated at: 2024-03-09 14:05:07"));
        assert!(doc.content.contains("<strong>2</strong>Files"));
        assert!(doc.content.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_contains_every_tree_line() {
        let tree = TestTree::new();
        tree.add_file("src/lib.rs", "");
        tree.add_file("src/nested/mod.rs", "");

        let config = Config::default();
        let model = walk(&tree, &config);
        let policy = IgnorePolicy::from_config(&config);
        let ctx = RenderContext::new(&config, &policy);
        let doc = HtmlGenerator.generate(&model, &ctx).unwrap();

        for line in model.lines() {
            assert!(doc.content.contains(&escape_html(line)), "missing {}", line);
        }
    }
}
