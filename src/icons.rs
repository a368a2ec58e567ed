//! Icons shown in front of entry names in the tree rendering

/// Icon for a directory, chosen by its (case-insensitive) name.
pub fn directory_icon(name: &str) -> &'static str {
    match name.to_lowercase().as_str() {
        "data" => "📊",
        "services" | "config" | "configuration" | "bin" | "obj" => "⚙️",
        "repository" | "repositories" => "🗄️",
        "assets" | "css" | "styles" => "🎨",
        "images" | "img" => "🖼️",
        "js" | "javascript" | "scripts" => "📜",
        "fonts" => "🔤",
        "docs" | "documentation" | "lib" | "libraries" => "📚",
        "tests" | "test" => "🧪",
        "wwwroot" | "public" => "🌐",
        "src" | "source" => "📂",
        "utils" | "utilities" | "helpers" => "🔧",
        "migrations" => "🗃️",
        "logs" => "📋",
        "temp" | "tmp" => "🗂️",
        "backup" | "backups" => "💾",
        _ => "📁",
    }
}

/// Icon for a file, chosen by well-known names first, then by extension.
pub fn file_icon(name: &str) -> &'static str {
    let lower = name.to_lowercase();

    if lower.contains("readme") {
        return "📖";
    }
    if lower.contains("license") {
        return "📄";
    }
    if lower.contains("changelog") {
        return "📝";
    }
    if lower.contains("gitignore") {
        return "🚫";
    }
    if lower.contains("dockerfile") {
        return "🐳";
    }
    if lower.contains("makefile") {
        return "⚡";
    }

    let ext = lower.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
    match ext {
        "rs" => "🦀",
        "cs" => "🔷",
        "csproj" | "log" => "📋",
        "sln" => "📂",
        "config" | "dll" | "yml" | "yaml" | "toml" | "ini" | "conf" => "⚙️",
        "exe" | "c" | "cpp" => "⚡",
        "html" | "htm" | "php" => "🌐",
        "css" | "xaml" | "svg" => "🎨",
        "js" | "ts" | "jsx" | "tsx" => "📜",
        "sql" => "🗃️",
        "db" | "sqlite" | "mdf" | "ldf" => "🗄️",
        "jpg" | "jpeg" | "png" | "gif" | "ico" | "bmp" => "🖼️",
        "md" => "📖",
        "pdf" => "📕",
        "doc" | "docx" => "📘",
        "xls" | "xlsx" | "ppt" | "pptx" => "📊",
        "zip" | "rar" | "7z" | "tar" | "gz" => "📦",
        "tmp" => "🗂️",
        "bak" => "💾",
        "py" => "🐍",
        "java" => "☕",
        "rb" => "💎",
        "go" => "🐹",
        _ => "📄",
    }
}

pub const ACCESS_DENIED_ICON: &str = "🔒";
pub const ERROR_ICON: &str = "❌";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_icons() {
        assert_eq!(directory_icon("src"), "📂");
        assert_eq!(directory_icon("Tests"), "🧪");
        assert_eq!(directory_icon("anything"), "📁");
    }

    #[test]
    fn test_file_icons() {
        assert_eq!(file_icon("README.md"), "📖");
        assert_eq!(file_icon("main.rs"), "🦀");
        assert_eq!(file_icon("Program.CS"), "🔷");
        assert_eq!(file_icon("Dockerfile"), "🐳");
        assert_eq!(file_icon("noext"), "📄");
    }
}
