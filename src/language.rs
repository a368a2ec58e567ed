//! Source language classification for the consolidated document
//!
//! Only files whose extension maps to a `Language` are inlined into the
//! consolidated output. The language decides the code fence tag and the
//! heading used in the file index.

/// Languages recognized as "source-like" content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    CSharp,
    JavaScript,
    TypeScript,
    Python,
    Java,
    Cpp,
    C,
    CHeader,
    CppHeader,
    Php,
    Ruby,
    Go,
    Rust,
    Kotlin,
    Swift,
    Dart,
    Scala,
    Html,
    Css,
    Scss,
    Less,
    Sql,
    Xml,
    Json,
    Yaml,
    Markdown,
    Text,
    Configuration,
    Ini,
    Toml,
    Shell,
    Batch,
    PowerShell,
    Vue,
    Jsx,
    Tsx,
    Svelte,
    Razor,
    RazorHtml,
    VbHtml,
}

impl Language {
    /// Detect language from a file extension, with or without the leading dot.
    ///
    /// Returns `None` for extensions that are not inlined.
    ///
    /// # Examples
    ///
    /// ```
    /// use treescribe::language::Language;
    ///
    /// assert_eq!(Language::from_extension("rs"), Some(Language::Rust));
    /// assert_eq!(Language::from_extension(".CS"), Some(Language::CSharp));
    /// assert_eq!(Language::from_extension("yml"), Some(Language::Yaml));
    /// assert_eq!(Language::from_extension("png"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        let lang = match ext.as_str() {
            "cs" => Language::CSharp,
            "js" => Language::JavaScript,
            "ts" => Language::TypeScript,
            "py" => Language::Python,
            "java" => Language::Java,
            "cpp" => Language::Cpp,
            "c" => Language::C,
            "h" => Language::CHeader,
            "hpp" => Language::CppHeader,
            "php" => Language::Php,
            "rb" => Language::Ruby,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "kt" => Language::Kotlin,
            "swift" => Language::Swift,
            "dart" => Language::Dart,
            "scala" => Language::Scala,
            "html" => Language::Html,
            "css" => Language::Css,
            "scss" => Language::Scss,
            "less" => Language::Less,
            "sql" => Language::Sql,
            "xml" => Language::Xml,
            "json" => Language::Json,
            "yaml" | "yml" => Language::Yaml,
            "md" => Language::Markdown,
            "txt" => Language::Text,
            "config" => Language::Configuration,
            "ini" => Language::Ini,
            "toml" => Language::Toml,
            "sh" => Language::Shell,
            "bat" => Language::Batch,
            "ps1" => Language::PowerShell,
            "vue" => Language::Vue,
            "jsx" => Language::Jsx,
            "tsx" => Language::Tsx,
            "svelte" => Language::Svelte,
            "razor" => Language::Razor,
            "cshtml" => Language::RazorHtml,
            "vbhtml" => Language::VbHtml,
            _ => return None,
        };
        Some(lang)
    }

    /// Tag placed after the opening code fence.
    pub fn fence_tag(&self) -> &'static str {
        match self {
            Language::CSharp => "csharp",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp | Language::C | Language::CHeader | Language::CppHeader => "cpp",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Kotlin => "kotlin",
            Language::Swift => "swift",
            Language::Dart => "dart",
            Language::Scala => "scala",
            Language::Html | Language::RazorHtml | Language::VbHtml => "html",
            Language::Css => "css",
            Language::Scss => "scss",
            Language::Less => "less",
            Language::Sql => "sql",
            Language::Xml => "xml",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Markdown => "markdown",
            Language::Shell => "bash",
            Language::Batch => "batch",
            Language::PowerShell => "powershell",
            Language::Vue => "vue",
            Language::Jsx => "jsx",
            Language::Tsx => "tsx",
            Language::Svelte => "svelte",
            Language::Razor => "razor",
            Language::Text | Language::Configuration | Language::Ini | Language::Toml => "text",
        }
    }

    /// Returns the human-readable name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Language::CSharp => "C#",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::C => "C",
            Language::CHeader => "C Header",
            Language::CppHeader => "C++ Header",
            Language::Php => "PHP",
            Language::Ruby => "Ruby",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Kotlin => "Kotlin",
            Language::Swift => "Swift",
            Language::Dart => "Dart",
            Language::Scala => "Scala",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Scss => "SCSS",
            Language::Less => "LESS",
            Language::Sql => "SQL",
            Language::Xml => "XML",
            Language::Json => "JSON",
            Language::Yaml => "YAML",
            Language::Markdown => "Markdown",
            Language::Text => "Text",
            Language::Configuration => "Configuration",
            Language::Ini => "INI Configuration",
            Language::Toml => "TOML Configuration",
            Language::Shell => "Shell Script",
            Language::Batch => "Batch Script",
            Language::PowerShell => "PowerShell",
            Language::Vue => "Vue.js",
            Language::Jsx => "JSX",
            Language::Tsx => "TSX",
            Language::Svelte => "Svelte",
            Language::Razor => "Razor",
            Language::RazorHtml => "Razor HTML",
            Language::VbHtml => "VB.NET HTML",
        }
    }
}

/// Display name for an extension, falling back to the upper-cased extension.
pub fn language_name(ext: &str) -> String {
    match Language::from_extension(ext) {
        Some(lang) => lang.name().to_string(),
        None => ext.trim_start_matches('.').to_uppercase(),
    }
}
