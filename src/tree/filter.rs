//! Ignore rules for tree walking
//!
//! `IgnorePolicy` is an immutable snapshot of the configured exclusion rules.
//! Everything is included unless some rule matches; there is no re-include.

use std::path::Path;

use glob::{MatchOptions, Pattern};
use tracing::warn;

use crate::config::{Config, FilterSettings};

/// Dotfiles that stay visible even when hidden files are excluded.
const VISIBLE_DOTFILES: &[&str] = &[".gitignore", ".gitattributes", ".editorconfig", ".config"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Exclusion rules applied to names and root-relative paths.
#[derive(Debug, Clone, Default)]
pub struct IgnorePolicy {
    include_hidden: bool,
    /// Lower-cased folder names, matched against every path segment
    folders: Vec<String>,
    /// Lower-cased literal file names
    file_names: Vec<String>,
    /// Wildcard file-name patterns such as `*.log`
    file_patterns: Vec<Pattern>,
    /// Lower-cased extensions including the leading dot
    extensions: Vec<String>,
    /// Patterns matched against the forward-slash relative path
    path_patterns: Vec<Pattern>,
}

impl IgnorePolicy {
    pub fn new(filters: &FilterSettings, include_hidden: bool) -> Self {
        let mut policy = Self {
            include_hidden,
            folders: lowercase_all(&filters.ignore_folders),
            ..Default::default()
        };

        for name in filters.ignore_files.iter().filter(|n| !n.is_empty()) {
            if is_wildcard(name) {
                if let Some(pattern) = compile(name) {
                    policy.file_patterns.push(pattern);
                }
            } else {
                policy.file_names.push(name.to_lowercase());
            }
        }

        policy.extensions = filters
            .ignore_extensions
            .iter()
            .filter(|e| !e.is_empty())
            .map(|e| {
                let e = e.to_lowercase();
                if e.starts_with('.') { e } else { format!(".{}", e) }
            })
            .collect();

        for raw in &filters.custom_ignore_patterns {
            let raw = raw.trim().trim_start_matches("./");
            if raw.is_empty() {
                continue;
            }
            if let Some(pattern) = compile(raw) {
                policy.path_patterns.push(pattern);
            }
            // `dir/**` should also exclude `dir` itself, not only what is inside it
            if let Some(prefix) = raw.strip_suffix("/**") {
                if !prefix.is_empty() {
                    if let Some(pattern) = compile(prefix) {
                        policy.path_patterns.push(pattern);
                    }
                }
            }
        }

        policy
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.filters, config.general.include_hidden_files)
    }

    /// Whether hidden files are shown.
    pub fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Whether `name` matches an ignored folder name (case-insensitive).
    pub fn is_ignored_folder(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        let lower = name.to_lowercase();
        self.folders.iter().any(|f| *f == lower)
    }

    /// Check a bare file or directory name against the name-based rules.
    pub fn must_ignore_name(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }

        if self.is_hidden(name) {
            return true;
        }

        if self.is_ignored_folder(name) {
            return true;
        }

        let lower = name.to_lowercase();
        if self.file_names.iter().any(|f| *f == lower) {
            return true;
        }
        if self
            .file_patterns
            .iter()
            .any(|p| p.matches_with(name, MATCH_OPTIONS))
        {
            return true;
        }

        self.extensions.iter().any(|ext| lower.ends_with(ext.as_str()))
    }

    /// Check a path relative to the walk root, given with forward slashes.
    ///
    /// Folder names are matched against every segment, the final segment goes
    /// through the name rules and custom patterns see the whole relative path.
    /// The empty path (the root itself) is never ignored.
    pub fn must_ignore_relative(&self, relative: &str) -> bool {
        let relative = relative.trim_matches('/');
        if relative.is_empty() {
            return false;
        }

        let mut segments = relative.split('/').filter(|s| !s.is_empty()).peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                if self.must_ignore_name(segment) {
                    return true;
                }
            } else if self.is_ignored_folder(segment) || self.is_hidden(segment) {
                return true;
            }
        }

        self.path_patterns
            .iter()
            .any(|p| p.matches_with(relative, MATCH_OPTIONS))
    }

    /// Check a full path against the rules, relative to `root`.
    ///
    /// Paths outside `root` fall back to the name rules on their last component.
    pub fn must_ignore_path(&self, path: &Path, root: &Path) -> bool {
        match path.strip_prefix(root) {
            Ok(relative) => self.must_ignore_relative(&to_forward_slashes(relative)),
            Err(_) => {
                let name = path
                    .file_name()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                self.must_ignore_name(&name)
            }
        }
    }

    fn is_hidden(&self, name: &str) -> bool {
        !self.include_hidden
            && name.starts_with('.')
            && name != "."
            && name != ".."
            && !VISIBLE_DOTFILES.iter().any(|d| d.eq_ignore_ascii_case(name))
    }
}

/// Render a relative path with `/` separators regardless of platform.
pub fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_wildcard(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// Compile a glob, skipping (and reporting) invalid patterns.
fn compile(raw: &str) -> Option<Pattern> {
    match Pattern::new(raw) {
        Ok(p) => Some(p),
        Err(e) => {
            warn!(pattern = raw, error = %e, "skipping invalid ignore pattern");
            None
        }
    }
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy_with(folders: &[&str], files: &[&str], exts: &[&str], patterns: &[&str]) -> IgnorePolicy {
        let filters = FilterSettings {
            ignore_folders: folders.iter().map(|s| s.to_string()).collect(),
            ignore_files: files.iter().map(|s| s.to_string()).collect(),
            ignore_extensions: exts.iter().map(|s| s.to_string()).collect(),
            custom_ignore_patterns: patterns.iter().map(|s| s.to_string()).collect(),
        };
        IgnorePolicy::new(&filters, false)
    }

    #[test]
    fn test_folder_names_match_every_segment() {
        let policy = policy_with(&["bin"], &[], &[], &[]);
        let root = Path::new("/project");
        assert!(policy.must_ignore_path(Path::new("/project/bin"), root));
        assert!(policy.must_ignore_path(Path::new("/project/src/bin"), root));
        assert!(policy.must_ignore_path(Path::new("/project/src/bin/tool.rs"), root));
        assert!(!policy.must_ignore_path(Path::new("/project/binary"), root));
        assert!(!policy.must_ignore_path(Path::new("/project/src/binary/x.rs"), root));
    }

    #[test]
    fn test_checks_are_idempotent() {
        let policy = policy_with(&["bin"], &["*.log"], &[".dll"], &[]);
        for _ in 0..3 {
            assert!(policy.must_ignore_name("bin"));
            assert!(policy.must_ignore_name("debug.log"));
            assert!(!policy.must_ignore_name("main.rs"));
        }
    }

    #[test]
    fn test_folder_match_is_case_insensitive() {
        let policy = policy_with(&["Debug"], &[], &[], &[]);
        assert!(policy.must_ignore_name("debug"));
        assert!(policy.must_ignore_name("DEBUG"));
        assert!(policy.must_ignore_relative("out/debug/app"));
    }

    #[test]
    fn test_folder_match_folds_non_ascii() {
        let policy = policy_with(&["Ünits"], &[], &[], &[]);
        assert!(policy.is_ignored_folder("Ünits"));
        assert!(policy.must_ignore_name("ÜNITS"));
        assert!(policy.must_ignore_name("ünits"));
        assert!(policy.must_ignore_relative("src/Ünits/a.rs"));
        assert!(!policy.must_ignore_name("Units"));
    }

    #[test]
    fn test_hidden_names() {
        let policy = policy_with(&[], &[], &[], &[]);
        assert!(policy.must_ignore_name(".git"));
        assert!(policy.must_ignore_name(".env"));
        assert!(!policy.must_ignore_name(".gitignore"));
        assert!(!policy.must_ignore_name("visible.txt"));
        assert!(policy.must_ignore_relative(".git/HEAD"));

        let permissive = IgnorePolicy::new(&FilterSettings::empty(), true);
        assert!(!permissive.must_ignore_name(".env"));
        assert!(!permissive.must_ignore_relative(".git/HEAD"));
    }

    #[test]
    fn test_empty_name_is_never_ignored() {
        let policy = IgnorePolicy::from_config(&Config::default());
        assert!(!policy.must_ignore_name(""));
        assert!(!policy.must_ignore_relative(""));
    }

    #[test]
    fn test_root_is_never_ignored() {
        let policy = policy_with(&["project"], &[], &[], &["**"]);
        let root = Path::new("/work/project");
        assert!(!policy.must_ignore_path(root, root));
    }

    #[test]
    fn test_file_names_literal_and_wildcard() {
        let policy = policy_with(&[], &["Thumbs.db", "*.tmp"], &[], &[]);
        assert!(policy.must_ignore_name("thumbs.db"));
        assert!(policy.must_ignore_name("scratch.TMP"));
        assert!(!policy.must_ignore_name("notes.txt"));
    }

    #[test]
    fn test_extensions_are_suffix_matched() {
        let policy = policy_with(&[], &[], &[".dll", "pdb"], &[]);
        assert!(policy.must_ignore_name("out.dll"));
        assert!(policy.must_ignore_name("OUT.DLL"));
        assert!(policy.must_ignore_name("app.pdb"));
        assert!(!policy.must_ignore_name("dll.txt"));
    }

    #[test]
    fn test_custom_patterns_use_relative_path() {
        let policy = policy_with(&[], &[], &[], &["**/generated/**", "docs/*.pdf"]);
        assert!(policy.must_ignore_relative("src/generated/api.rs"));
        assert!(policy.must_ignore_relative("src/generated"));
        assert!(policy.must_ignore_relative("docs/manual.pdf"));
        assert!(!policy.must_ignore_relative("docs/sub/manual.pdf"));
        assert!(!policy.must_ignore_relative("src/main.rs"));
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let policy = policy_with(&[], &["[unclosed"], &[], &["src/[oops"]);
        assert!(!policy.must_ignore_name("file.txt"));
        assert!(!policy.must_ignore_relative("src/main.rs"));
    }

    #[test]
    fn test_to_forward_slashes() {
        assert_eq!(to_forward_slashes(Path::new("a/b/c.txt")), "a/b/c.txt");
        assert_eq!(to_forward_slashes(Path::new("")), "");
    }
}
