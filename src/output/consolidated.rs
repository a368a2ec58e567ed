//! Consolidated document: every source file of the project in one markdown file
//!
//! This format runs its own traversal over the root instead of reading the
//! model's entries. It keeps regular files whose extension is a known source
//! language, skips anything inside an ignored folder and anything larger than
//! `MAX_INLINED_FILE_SIZE`. A file that cannot be read leaves an inline note;
//! the rest of the document is still produced.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::language::{Language, language_name};
use crate::project::detect_project;
use crate::tree::{IgnorePolicy, StructureModel, extension_of, to_forward_slashes};

use super::config::RenderContext;
use super::utils::format_kb;
use super::{OutputDocument, OutputGenerator};

/// Files above this size are left out of the document.
pub const MAX_INLINED_FILE_SIZE: u64 = 1024 * 1024;

/// Build and tooling output folders, skipped in addition to the configured ones.
const BUILTIN_IGNORED_FOLDERS: &[&str] = &[
    "bin",
    "obj",
    "node_modules",
    ".git",
    ".vs",
    ".vscode",
    "packages",
    "Debug",
    "Release",
    "dist",
    "build",
    "target",
    ".idea",
];

const WIDE_RULE: usize = 80;

/// A file selected for inlining.
#[derive(Debug, Clone)]
pub(crate) struct SourceFile {
    pub absolute: PathBuf,
    /// `/`-separated, relative to the root
    pub relative: String,
    pub name: String,
    pub extension: String,
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
}

/// Generator for the `consolidated` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolidatedGenerator;

impl OutputGenerator for ConsolidatedGenerator {
    fn generate(&self, model: &StructureModel, ctx: &RenderContext) -> Result<OutputDocument> {
        let files = collect_source_files(model.root_path(), ctx.policy);
        debug!(count = files.len(), "collected source files");

        let mut output = String::new();
        write_header(&mut output, model, ctx);
        write_index(&mut output, &files);

        output.push('\n');
        output.push_str(&"=".repeat(WIDE_RULE));
        output.push_str("\n# PROJECT FILES\n");
        output.push_str(&"=".repeat(WIDE_RULE));
        output.push_str("\n\n");

        for file in &files {
            write_file(&mut output, file);
        }

        Ok(self.document(output))
    }

    fn file_extension(&self) -> &'static str {
        "consolidated.md"
    }

    fn format_name(&self) -> &'static str {
        "Consolidated Code"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["consolidated", "single", "all-in-one"]
    }
}

fn is_pruned_dir(entry: &DirEntry, policy: &IgnorePolicy) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    BUILTIN_IGNORED_FOLDERS
        .iter()
        .any(|f| f.eq_ignore_ascii_case(&name))
        || policy.must_ignore_name(&name)
}

/// Select source files under `root`, sorted by relative path.
pub(crate) fn collect_source_files(root: &Path, policy: &IgnorePolicy) -> Vec<SourceFile> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_pruned_dir(e, policy))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable path");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if policy.must_ignore_name(&name) {
            continue;
        }
        let extension = extension_of(&name);
        if Language::from_extension(&extension).is_none() {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                debug!(path = %entry.path().display(), error = %e, "cannot stat file");
                continue;
            }
        };
        if metadata.len() > MAX_INLINED_FILE_SIZE {
            debug!(path = %entry.path().display(), size = metadata.len(), "file too large to inline");
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map(to_forward_slashes)
            .unwrap_or_else(|_| name.clone());

        files.push(SourceFile {
            absolute: entry.path().to_path_buf(),
            relative,
            name,
            extension,
            size: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::<Local>::from),
        });
    }

    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    files
}

fn write_header(output: &mut String, model: &StructureModel, ctx: &RenderContext) {
    let project = detect_project(model);

    output.push_str("# CONSOLIDATED PROJECT FOR AI ANALYSIS\n\n");
    output.push_str(
        "This document contains every source file of the project in a single file,\n",
    );
    output.push_str("ready to be shared with an AI assistant.\n\n");

    output.push_str("## PROJECT INFORMATION\n\n");
    output.push_str(&format!("- **Name:** {}\n", model.root_name()));
    output.push_str(&format!("- **Path:** {}\n", model.root_path().display()));
    output.push_str(&format!("- **Type:** {}\n", project.kind));
    output.push_str(&format!("- **Language:** {}\n", project.language));
    if !project.framework.is_empty() && project.framework != project.language {
        output.push_str(&format!("- **Framework:** {}\n", project.framework));
    }
    output.push_str(&format!("- **Description:** {}\n", project.description));
    if ctx.include_timestamp() {
        output.push_str(&format!("- **Generated at:** {}\n", ctx.timestamp_dmy()));
    }
    output.push('\n');

    output.push_str("## STATISTICS\n\n");
    output.push_str(&format!("- **Total Folders:** {}\n", model.folder_count()));
    output.push_str(&format!("- **Total Files:** {}\n", model.file_count()));
    output.push_str(&format!("- **Processed Items:** {}\n\n", model.processed_count()));
}

fn write_index(output: &mut String, files: &[SourceFile]) {
    output.push_str("## FILE INDEX\n\n");
    output.push_str("The following files are included in this document:\n\n");

    let mut groups: BTreeMap<&str, Vec<&SourceFile>> = BTreeMap::new();
    for file in files {
        groups.entry(file.extension.as_str()).or_default().push(file);
    }

    // Files are already sorted by relative path, so each group is too
    for (extension, group) in groups {
        output.push_str(&format!("### {} ({})\n\n", language_name(extension), extension));
        for file in group {
            output.push_str(&format!("- `{}` ({} KB)\n", file.relative, format_kb(file.size)));
        }
        output.push('\n');
    }

    output.push_str(&format!("**Total:** {} source files\n\n", files.len()));
}

/// Append one file section. A read failure becomes an inline note.
pub(crate) fn write_file(output: &mut String, file: &SourceFile) {
    match fs::read(&file.absolute) {
        Ok(bytes) => {
            let content = clean_content(&String::from_utf8_lossy(&bytes));
            let fence = Language::from_extension(&file.extension)
                .map(|l| l.fence_tag())
                .unwrap_or("text");
            let modified = file
                .modified
                .map(|t| t.format("%d/%m/%Y %H:%M:%S").to_string())
                .unwrap_or_else(|| "unknown".to_string());

            output.push_str(&format!("## {}\n\n", file.relative));
            output.push_str(&format!("**Type:** {}  \n", language_name(&file.extension)));
            output.push_str(&format!("**Size:** {} KB  \n", format_kb(file.size)));
            output.push_str(&format!("**Last Modified:** {}\n\n", modified));
            output.push_str(&format!("```{}\n", fence));
            output.push_str(&content);
            output.push_str("\n```\n\n");
        }
        Err(e) => {
            warn!(path = %file.absolute.display(), error = %e, "cannot read file for consolidated output");
            output.push_str(&format!("**ERROR reading file {}:** {}\n\n", file.name, e));
        }
    }
    output.push_str(&"-".repeat(WIDE_RULE));
    output.push_str("\n\n");
}

/// Replace control characters with a space.
///
/// Tab, CR and LF, printable ASCII and every code point from U+00A0 up are
/// kept; C0 controls, DEL and the C1 range are not.
pub fn clean_content(content: &str) -> String {
    content
        .chars()
        .map(|c| match c {
            '\t' | '\r' | '\n' => c,
            ' '..='~' => c,
            c if (c as u32) >= 160 => c,
            _ => ' ',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::output::test_support::{fixed_time, walk};
    use crate::test_utils::TestTree;

    fn render(tree: &TestTree, config: &Config) -> String {
        let model = walk(tree, config);
        let policy = IgnorePolicy::from_config(config);
        let ctx = RenderContext::new(config, &policy).with_timestamp(fixed_time());
        ConsolidatedGenerator.generate(&model, &ctx).unwrap().content
    }

    #[test]
    fn test_clean_content() {
        assert_eq!(clean_content("a\0b"), "a b");
        assert_eq!(clean_content("tab\there\r\n"), "tab\there\r\n");
        assert_eq!(clean_content("bell\u{7}del\u{7f}c1\u{85}"), "bell del c1 ");
        assert_eq!(clean_content("caf\u{e9} \u{a0}ok ✓"), "caf\u{e9} \u{a0}ok ✓");
    }

    #[test]
    fn test_selects_source_files_only() {
        let tree = TestTree::new();
        tree.add_file("src/main.rs", "fn main() {}");
        tree.add_file("src/lib.rs", "pub mod x;");
        tree.add_file("README.md", "# hi");
        tree.add_bytes("logo.png", &[0x89, 0x50, 0x4e, 0x47]);
        tree.add_file("target/debug/build.rs", "ignored");
        tree.add_file("deep/node_modules/pkg/index.js", "ignored");
        tree.add_file(".hidden/secret.rs", "ignored");
        tree.add_file("app.log.txt", "kept");
        tree.add_file("notes.log", "ignored by file pattern");

        let policy = IgnorePolicy::from_config(&Config::default());
        let files = collect_source_files(tree.path(), &policy);
        let names: Vec<&str> = files.iter().map(|f| f.relative.as_str()).collect();
        assert_eq!(names, vec!["README.md", "app.log.txt", "src/lib.rs", "src/main.rs"]);
    }

    #[test]
    fn test_size_ceiling() {
        let tree = TestTree::new();
        tree.add_sized("exact.txt", MAX_INLINED_FILE_SIZE as usize);
        tree.add_sized("over.txt", MAX_INLINED_FILE_SIZE as usize + 1);

        let policy = IgnorePolicy::default();
        let files = collect_source_files(tree.path(), &policy);
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["exact.txt"]);
    }

    #[test]
    fn test_document_sections() {
        let tree = TestTree::new();
        tree.add_file("Cargo.toml", "[package]\nname = \"demo\"\n");
        tree.add_file("src/main.rs", "fn main() {}\n");

        let content = render(&tree, &Config::default());
        assert!(content.starts_with("# CONSOLIDATED PROJECT FOR AI ANALYSIS"));
        assert!(content.contains("- **Type:** Rust Application\n"));
        assert!(content.contains("- **Generated at:** 09/03/2024 14:05:07\n"));
        assert!(content.contains("### Rust (.rs)\n\n- `src/main.rs` (0.0 KB)\n"));
        assert!(content.contains("### TOML Configuration (.toml)\n"));
        assert!(content.contains("**Total:** 2 source files"));
        assert!(content.contains("# PROJECT FILES"));
        assert!(content.contains("## src/main.rs\n\n**Type:** Rust  \n"));
        assert!(content.contains("```rust\nfn main() {}\n\n```"));

        // Index groups are ordered by extension
        let rs = content.find("### Rust").unwrap();
        let toml = content.find("### TOML").unwrap();
        assert!(rs < toml);
        // File sections are ordered by relative path
        let cargo = content.find("## Cargo.toml").unwrap();
        let main = content.find("## src/main.rs").unwrap();
        assert!(cargo < main);
    }

    #[test]
    fn test_nul_bytes_become_spaces() {
        let tree = TestTree::new();
        tree.add_bytes("data.txt", b"before\0after\n");

        let content = render(&tree, &Config::default());
        assert!(content.contains("before after"));
        assert!(!content.contains('\0'));
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let tree = TestTree::new();
        tree.add_bytes("bad.txt", &[b'o', b'k', 0xff, 0xfe, b'!']);

        let content = render(&tree, &Config::default());
        assert!(content.contains("ok"));
        assert!(content.contains('!'));
    }

    #[test]
    fn test_read_failure_is_inline() {
        let file = SourceFile {
            absolute: PathBuf::from("/definitely/not/here/gone.rs"),
            relative: "gone.rs".to_string(),
            name: "gone.rs".to_string(),
            extension: ".rs".to_string(),
            size: 0,
            modified: None,
        };
        let mut output = String::new();
        write_file(&mut output, &file);
        assert!(output.starts_with("**ERROR reading file gone.rs:** "));
        assert!(output.contains(&"-".repeat(80)));

        let mut next = output.clone();
        let tree = TestTree::new();
        let ok = tree.add_file("ok.rs", "fn ok() {}");
        write_file(
            &mut next,
            &SourceFile {
                absolute: ok,
                relative: "ok.rs".to_string(),
                name: "ok.rs".to_string(),
                extension: ".rs".to_string(),
                size: 10,
                modified: None,
            },
        );
        assert!(next.contains("## ok.rs"));
        assert!(next.contains("**Last Modified:** unknown"));
    }

    #[test]
    fn test_extension_is_distinct_from_markdown() {
        assert_eq!(ConsolidatedGenerator.file_extension(), "consolidated.md");
        assert!(ConsolidatedGenerator.supports_format("All-In-One"));
    }
}
