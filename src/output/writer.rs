//! Rendering requested formats and writing them to disk
//!
//! Formats are resolved up front, so an unknown name fails the whole run
//! before any work is done. Rendering then runs in parallel across formats;
//! each format's result, and each file write, is independent of the others.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::tree::StructureModel;

use super::config::RenderContext;
use super::registry::GeneratorRegistry;
use super::{OutputDocument, OutputGenerator};

const FALLBACK_BASE_NAME: &str = "project-structure";

/// Where output files go: `{dir}/{base}.{extension}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub dir: PathBuf,
    pub base: String,
}

impl OutputTarget {
    pub fn new(dir: impl Into<PathBuf>, base: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base: base.into(),
        }
    }

    /// Split a base path such as `docs/project-structure.md` into its
    /// directory and its file stem; any extension on the base is dropped.
    pub fn from_base_path(path: &Path) -> Self {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let base = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FALLBACK_BASE_NAME.to_string());
        Self { dir, base }
    }

    pub fn path_for(&self, extension: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", self.base, extension))
    }
}

/// The rendering of one requested format.
#[derive(Debug)]
pub struct FormatOutcome {
    /// The format name as requested
    pub format: String,
    pub result: Result<OutputDocument>,
}

/// Resolve every format, then render them in parallel.
///
/// Formats whose generators share a file extension would write the same
/// path, so only the first of them is rendered.
pub fn render_formats(
    registry: &GeneratorRegistry,
    formats: &[String],
    model: &StructureModel,
    ctx: &RenderContext,
) -> Result<Vec<FormatOutcome>> {
    let mut generators: Vec<(String, Box<dyn OutputGenerator>)> = Vec::new();
    for format in formats {
        let generator = registry.create(format)?;
        if generators
            .iter()
            .any(|(_, g)| g.file_extension() == generator.file_extension())
        {
            debug!(format = %format, "skipping format with an already requested output file");
            continue;
        }
        generators.push((format.clone(), generator));
    }

    let outcomes = generators
        .par_iter()
        .map(|(format, generator)| {
            let result = generator.generate(model, ctx);
            if let Err(e) = &result {
                warn!(format = %format, error = %e, "failed to render format");
            }
            FormatOutcome {
                format: format.clone(),
                result,
            }
        })
        .collect();
    Ok(outcomes)
}

/// Write each document to `{dir}/{base}.{extension}`, creating `dir`.
///
/// Returns one result per document, in order; a failed write does not stop
/// the others.
pub fn write_documents(target: &OutputTarget, documents: &[OutputDocument]) -> Vec<Result<PathBuf>> {
    if let Err(e) = fs::create_dir_all(&target.dir) {
        warn!(dir = %target.dir.display(), error = %e, "cannot create output directory");
    }

    documents
        .iter()
        .map(|doc| -> Result<PathBuf> {
            let path = target.path_for(&doc.extension);
            fs::write(&path, &doc.content).map_err(|e| Error::io(&path, e))?;
            info!(format = %doc.format_name, path = %path.display(), "wrote output file");
            Ok(path)
        })
        .collect()
}
