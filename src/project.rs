//! Project type detection
//!
//! Classifies a walked tree by its marker files (`Cargo.toml`,
//! `package.json`, `*.csproj`, ...) for the consolidated document header.
//! Detection only looks at the already-filtered walk, so ignored folders
//! never influence the result.

use std::collections::HashMap;

use crate::tree::{Entry, StructureModel};

/// What kind of project a tree looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub kind: String,
    pub language: String,
    pub framework: String,
    pub description: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            kind: "Unknown".to_string(),
            language: String::new(),
            framework: String::new(),
            description: String::new(),
        }
    }
}

impl ProjectInfo {
    fn new(kind: &str, language: &str, framework: &str, description: &str) -> Self {
        Self {
            kind: kind.to_string(),
            language: language.to_string(),
            framework: framework.to_string(),
            description: description.to_string(),
        }
    }
}

/// Views over the walk used by the individual detectors.
struct Markers<'a> {
    root_files: Vec<&'a str>,
    /// Lower-cased relative paths of every file
    files: Vec<String>,
    /// Lower-cased relative paths of every directory
    dirs: Vec<String>,
}

impl<'a> Markers<'a> {
    fn from_entries(entries: &'a [Entry]) -> Self {
        let mut root_files = Vec::new();
        let mut files = Vec::new();
        let mut dirs = Vec::new();
        for entry in entries {
            if entry.is_dir() {
                dirs.push(entry.relative_path.to_lowercase());
            } else if entry.is_file() {
                if entry.depth == 0 {
                    root_files.push(entry.name.as_str());
                }
                files.push(entry.relative_path.to_lowercase());
            }
        }
        Self {
            root_files,
            files,
            dirs,
        }
    }

    fn has_root(&self, name: &str) -> bool {
        self.root_files.contains(&name)
    }

    fn root_ends_with(&self, suffix: &str) -> bool {
        self.root_files.iter().any(|f| f.to_lowercase().ends_with(suffix))
    }

    fn count_ext(&self, suffix: &str) -> usize {
        self.files.iter().filter(|f| f.ends_with(suffix)).count()
    }

    fn any_file_mentions(&self, needle: &str) -> bool {
        self.files.iter().any(|f| f.contains(needle))
    }

    fn any_dir_mentions(&self, needle: &str) -> bool {
        self.dirs.iter().any(|d| d.contains(needle))
    }
}

/// Detect the project type of a walked tree.
pub fn detect_project(model: &StructureModel) -> ProjectInfo {
    let markers = Markers::from_entries(model.entries());

    let detectors: [fn(&Markers) -> Option<ProjectInfo>; 9] = [
        detect_dotnet,
        detect_node,
        detect_python,
        detect_java,
        detect_php,
        detect_ruby,
        detect_go,
        detect_rust,
        detect_static_site,
    ];

    detectors
        .iter()
        .find_map(|detect| detect(&markers))
        .or_else(|| detect_mixed(model.entries()))
        .unwrap_or_default()
}

fn detect_dotnet(m: &Markers) -> Option<ProjectInfo> {
    let has_csproj = m.count_ext(".csproj") > 0;
    let has_sln = m.root_ends_with(".sln");
    if !(has_csproj || has_sln || m.count_ext(".cs") > 3) {
        return None;
    }

    let info = if m.any_dir_mentions("controllers")
        || m.any_dir_mentions("wwwroot")
        || m.files.iter().any(|f| f.ends_with("startup.cs"))
    {
        ProjectInfo::new(
            "ASP.NET Web API / MVC",
            "C#",
            ".NET",
            "ASP.NET Core Web Application",
        )
    } else if m.files.iter().any(|f| f.ends_with("program.cs")) {
        ProjectInfo::new(
            ".NET Console Application",
            "C#",
            ".NET",
            ".NET Console Application",
        )
    } else {
        ProjectInfo::new(
            ".NET Library/Application",
            "C#",
            ".NET",
            ".NET Class Library or Application",
        )
    };
    Some(info)
}

fn detect_node(m: &Markers) -> Option<ProjectInfo> {
    if !m.has_root("package.json") {
        return None;
    }

    let language = if m.count_ext(".ts") > m.count_ext(".js") {
        "TypeScript"
    } else {
        "JavaScript/TypeScript"
    };

    let (kind, description) = if m.has_root("next.config.js") || m.any_file_mentions("next") {
        ("Next.js Application", "Next.js React Framework")
    } else if m.has_root("angular.json") || m.any_file_mentions("angular") {
        ("Angular Application", "Angular Frontend Framework")
    } else if m.has_root("yarn.lock") || m.any_file_mentions("react") {
        ("React Application", "React Frontend Application")
    } else if m.any_file_mentions("express") {
        ("Express.js API", "Express.js Backend API")
    } else {
        ("Node.js Application", "Node.js Application")
    };
    Some(ProjectInfo::new(kind, language, "Node.js", description))
}

fn detect_python(m: &Markers) -> Option<ProjectInfo> {
    let marker = ["requirements.txt", "setup.py", "pyproject.toml"]
        .iter()
        .any(|name| m.has_root(name));
    if !(marker || m.count_ext(".py") > 0) {
        return None;
    }

    let (kind, description) = if m.has_root("manage.py") || m.any_file_mentions("django") {
        ("Django Web Application", "Django Web Framework")
    } else if m.any_file_mentions("flask") {
        ("Flask Web Application", "Flask Micro Web Framework")
    } else if m.any_file_mentions("fastapi") {
        ("FastAPI Application", "FastAPI Modern Web Framework")
    } else {
        ("Python Application", "Python Application or Script")
    };
    Some(ProjectInfo::new(kind, "Python", "Python", description))
}

fn detect_java(m: &Markers) -> Option<ProjectInfo> {
    let marker = ["pom.xml", "build.gradle", "build.xml"]
        .iter()
        .any(|name| m.has_root(name));
    if !(marker || m.count_ext(".java") > 0) {
        return None;
    }

    let framework = if m.has_root("pom.xml") {
        "Maven"
    } else if m.has_root("build.gradle") {
        "Gradle"
    } else {
        "Java"
    };
    let (kind, description) = if m.any_file_mentions("spring") {
        ("Spring Boot Application", "Spring Boot Java Framework")
    } else {
        ("Java Application", "Java Application")
    };
    Some(ProjectInfo::new(kind, "Java", framework, description))
}

fn detect_php(m: &Markers) -> Option<ProjectInfo> {
    if !(m.has_root("composer.json") || m.count_ext(".php") > 0) {
        return None;
    }

    let (kind, description) = if m.any_file_mentions("laravel") || m.any_dir_mentions("artisan") {
        ("Laravel Application", "Laravel PHP Framework")
    } else if m.any_file_mentions("symfony") {
        ("Symfony Application", "Symfony PHP Framework")
    } else {
        ("PHP Application", "PHP Web Application")
    };
    Some(ProjectInfo::new(kind, "PHP", "PHP", description))
}

fn detect_ruby(m: &Markers) -> Option<ProjectInfo> {
    if !(m.has_root("Gemfile") || m.has_root("Rakefile") || m.count_ext(".rb") > 0) {
        return None;
    }

    let (kind, description) = if m.any_file_mentions("rails") || m.any_dir_mentions("config") {
        ("Ruby on Rails Application", "Ruby on Rails Framework")
    } else {
        ("Ruby Application", "Ruby Application or Script")
    };
    Some(ProjectInfo::new(kind, "Ruby", "Ruby", description))
}

fn detect_go(m: &Markers) -> Option<ProjectInfo> {
    if !(m.has_root("go.mod") || m.has_root("go.sum") || m.count_ext(".go") > 0) {
        return None;
    }
    Some(ProjectInfo::new(
        "Go Application",
        "Go",
        "Go",
        "Go Application or Service",
    ))
}

fn detect_rust(m: &Markers) -> Option<ProjectInfo> {
    if !(m.has_root("Cargo.toml") || m.has_root("Cargo.lock") || m.count_ext(".rs") > 0) {
        return None;
    }
    Some(ProjectInfo::new(
        "Rust Application",
        "Rust",
        "Rust",
        "Rust Application or Library",
    ))
}

fn detect_static_site(m: &Markers) -> Option<ProjectInfo> {
    let has_assets = m.count_ext(".css") > 0 || m.count_ext(".js") > 0;
    if m.count_ext(".html") == 0 || !has_assets {
        return None;
    }
    Some(ProjectInfo::new(
        "Static Website",
        "HTML/CSS/JavaScript",
        "Frontend",
        "Static HTML/CSS/JS Website",
    ))
}

/// Fallback: the three most frequent extensions.
fn detect_mixed(entries: &[Entry]) -> Option<ProjectInfo> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for ext in entries.iter().filter_map(|e| e.extension()) {
        if !ext.is_empty() {
            *counts.entry(ext).or_insert(0) += 1;
        }
    }
    if counts.is_empty() {
        return None;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let top: Vec<&str> = ranked.iter().take(3).map(|(ext, _)| *ext).collect();
    let joined = top.join(", ");

    Some(ProjectInfo {
        kind: "Mixed Project".to_string(),
        description: format!("Project with: {}", joined),
        language: joined,
        framework: String::new(),
    })
}
