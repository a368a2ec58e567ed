//! CLI entry point for treescribe

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing::{debug, error};
use treescribe::icons::directory_icon;
use treescribe::logging::init_logging;
use treescribe::{
    Config, ConsolePrinter, GeneratorRegistry, IgnorePolicy, OutputDocument, OutputTarget,
    ProgressObserver, RenderContext, StructureModel, TreeWalker, WalkerConfig, render_formats,
    write_documents,
};

/// Determine whether to use color output based on the environment.
fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    // Respect FORCE_COLOR environment variable
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    // Respect TERM=dumb
    if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[derive(Parser, Debug)]
#[command(name = "treescribe")]
#[command(about = "Document a project's directory structure as tree text, JSON, HTML or a consolidated source dump")]
#[command(version)]
struct Args {
    /// Directory to document
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output base path; one file per format is written next to it
    /// (default: general.default_output_path from the configuration)
    output: Option<PathBuf>,

    /// Print the finished tree instead of animating the walk
    #[arg(long = "no-animation")]
    no_animation: bool,

    /// Configuration file (TOML)
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("treescribe: {}", message);
    process::exit(1);
}

fn walk(root: &Path, config: &Config, policy: &IgnorePolicy, animate: bool) -> StructureModel {
    let walker = TreeWalker::new(WalkerConfig::from_config(config), policy);

    let result = if animate {
        let name = root
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string());
        let root_line = format!("{} {}", directory_icon(&name), name);
        let mut observer = ProgressObserver::new(&root_line, config.animation_delay());
        walker.walk_with(root, &mut observer)
    } else {
        walker.walk(root)
    };

    result.unwrap_or_else(|e| fail(e))
}

fn main() {
    let args = Args::parse();
    init_logging();

    let config = match &args.config {
        Some(path) => Config::load(path).unwrap_or_else(|e| fail(e)),
        None => Config::default(),
    };

    let root = absolute(&args.path);
    let policy = IgnorePolicy::from_config(&config);
    let animate =
        !args.no_animation && config.general.show_animation && std::io::stderr().is_terminal();
    debug!(root = %root.display(), animate, "starting");

    let model = walk(&root, &config, &policy, animate);

    if !animate {
        if let Err(e) = ConsolePrinter::new(should_use_color()).print(&model) {
            fail(format!("error writing output: {}", e));
        }
    }

    let base_path = match &args.output {
        Some(path) => absolute(path),
        None => config.output_path(model.root_path()),
    };
    let target = OutputTarget::from_base_path(&base_path);

    let registry = GeneratorRegistry::default();
    let ctx = RenderContext::new(&config, &policy);
    let outcomes = render_formats(&registry, &config.output.formats, &model, &ctx)
        .unwrap_or_else(|e| fail(e));

    let mut failed = false;
    let mut documents: Vec<OutputDocument> = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                error!(format = %outcome.format, error = %e, "format failed");
                eprintln!("treescribe: format '{}' failed: {}", outcome.format, e);
                failed = true;
            }
        }
    }

    println!();
    for (doc, result) in documents.iter().zip(write_documents(&target, &documents)) {
        match result {
            Ok(path) => println!("{}: {}", doc.format_name, path.display()),
            Err(e) => {
                eprintln!("treescribe: {}", e);
                failed = true;
            }
        }
    }

    if failed {
        process::exit(1);
    }
}
