//! JSON document with summary statistics
//!
//! The structure is a flat array of items in walk order. Statistics are
//! computed over that array, so both always describe the same entries.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Result;
use crate::tree::{Entry, EntryKind, StructureModel};

use super::config::RenderContext;
use super::utils::format_bytes;
use super::{OutputDocument, OutputGenerator};

const LARGEST_FILES_LIMIT: usize = 10;

/// One entry of the flat `structure` array.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum JsonItem {
    Directory {
        name: String,
        relative_path: String,
        depth: usize,
    },
    File {
        name: String,
        relative_path: String,
        depth: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        extension: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        size_formatted: Option<String>,
    },
    Error {
        name: String,
        relative_path: String,
        depth: usize,
        error: String,
    },
}

impl JsonItem {
    pub fn from_entry(entry: &Entry) -> Self {
        let name = entry.name.clone();
        let relative_path = entry.relative_path.clone();
        let depth = entry.depth;
        match &entry.kind {
            EntryKind::Directory => JsonItem::Directory {
                name,
                relative_path,
                depth,
            },
            EntryKind::File { extension, size } => JsonItem::File {
                name,
                relative_path,
                depth,
                extension: Some(extension.clone()).filter(|e| !e.is_empty()),
                size: *size,
                size_formatted: size.map(format_bytes),
            },
            EntryKind::AccessDenied => JsonItem::Error {
                name,
                relative_path,
                depth,
                error: "UnauthorizedAccess".to_string(),
            },
            EntryKind::Error { message } => JsonItem::Error {
                name,
                relative_path,
                depth,
                error: message.clone(),
            },
        }
    }

    pub fn relative_path(&self) -> &str {
        match self {
            JsonItem::Directory { relative_path, .. }
            | JsonItem::File { relative_path, .. }
            | JsonItem::Error { relative_path, .. } => relative_path,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            JsonItem::Directory { depth, .. }
            | JsonItem::File { depth, .. }
            | JsonItem::Error { depth, .. } => *depth,
        }
    }
}

/// Extension counts, serialized as an object whose keys keep their order:
/// count descending, then extension ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTypeCounts(pub Vec<(String, usize)>);

impl FileTypeCounts {
    pub fn get(&self, extension: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(ext, _)| ext == extension)
            .map(|(_, count)| *count)
    }
}

impl Serialize for FileTypeCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (ext, count) in &self.0 {
            map.serialize_entry(ext, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LargeFile {
    pub name: String,
    pub relative_path: String,
    pub size: u64,
    pub size_formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonStatistics {
    pub total_folders: usize,
    pub total_files: usize,
    pub total_items: usize,
    pub file_types: FileTypeCounts,
    pub largest_files: Vec<LargeFile>,
    pub deepest_path: usize,
}

impl JsonStatistics {
    /// Aggregate over the structure array of a document.
    pub fn compute(model: &StructureModel, items: &[JsonItem]) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut largest = Vec::new();
        let mut deepest_path = 0;

        for item in items {
            deepest_path = deepest_path.max(item.depth());

            if let JsonItem::File {
                name,
                relative_path,
                extension,
                size,
                ..
            } = item
            {
                if let Some(ext) = extension {
                    *counts.entry(ext.as_str()).or_insert(0) += 1;
                }
                if let Some(size) = size.filter(|s| *s > 0) {
                    largest.push(LargeFile {
                        name: name.clone(),
                        relative_path: relative_path.clone(),
                        size,
                        size_formatted: format_bytes(size),
                    });
                }
            }
        }

        let mut file_types: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(ext, count)| (ext.to_string(), count))
            .collect();
        file_types.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        // Stable sort keeps traversal order among equal sizes
        largest.sort_by(|a, b| b.size.cmp(&a.size));
        largest.truncate(LARGEST_FILES_LIMIT);

        Self {
            total_folders: model.folder_count(),
            total_files: model.file_count(),
            total_items: model.processed_count(),
            file_types: FileTypeCounts(file_types),
            largest_files: largest,
            deepest_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonConfiguration {
    pub include_hidden_files: bool,
    pub max_depth: i32,
    pub formats: Vec<String>,
}

/// The complete JSON document.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonDocument {
    pub project_name: String,
    pub path: String,
    pub generated_at: DateTime<Local>,
    pub configuration: JsonConfiguration,
    pub statistics: JsonStatistics,
    pub structure: Vec<JsonItem>,
}

impl JsonDocument {
    pub fn build(model: &StructureModel, ctx: &RenderContext) -> Self {
        let structure: Vec<JsonItem> = model.entries().iter().map(JsonItem::from_entry).collect();
        let statistics = JsonStatistics::compute(model, &structure);
        let general = &ctx.config.general;

        Self {
            project_name: model.root_name().to_string(),
            path: model.root_path().display().to_string(),
            generated_at: ctx.generated_at,
            configuration: JsonConfiguration {
                include_hidden_files: general.include_hidden_files,
                max_depth: general.max_depth,
                formats: ctx.config.output.formats.clone(),
            },
            statistics,
            structure,
        }
    }
}

/// Generator for the `json` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonGenerator;

impl OutputGenerator for JsonGenerator {
    fn generate(&self, model: &StructureModel, ctx: &RenderContext) -> Result<OutputDocument> {
        let document = JsonDocument::build(model, ctx);
        let json = serde_json::to_string_pretty(&document)?;
        Ok(self.document(json))
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["json"]
    }
}
