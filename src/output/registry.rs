//! Format name to generator lookup

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};

use super::OutputGenerator;
use super::consolidated::ConsolidatedGenerator;
use super::html::HtmlGenerator;
use super::json::JsonGenerator;
use super::tree::TreeTextGenerator;

/// Builds a fresh generator for one format.
pub type GeneratorFactory = Arc<dyn Fn() -> Box<dyn OutputGenerator> + Send + Sync>;

/// Registry of output formats, keyed by lower-cased, trimmed name.
///
/// Several names may share one factory (`md` and `markdown`). Formats can be
/// added or removed at runtime.
#[derive(Clone)]
pub struct GeneratorRegistry {
    factories: HashMap<String, GeneratorFactory>,
}

fn normalize(format: &str) -> String {
    format.trim().to_lowercase()
}

impl GeneratorRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a generator type under every one of its aliases.
    fn register_default<G>(&mut self, generator: G)
    where
        G: OutputGenerator + Clone + 'static,
    {
        let aliases = generator.aliases();
        let factory: GeneratorFactory =
            Arc::new(move || -> Box<dyn OutputGenerator> { Box::new(generator.clone()) });
        for alias in aliases {
            self.factories.insert(normalize(alias), Arc::clone(&factory));
        }
    }

    /// Create a generator for `format`.
    pub fn create(&self, format: &str) -> Result<Box<dyn OutputGenerator>> {
        self.factories
            .get(&normalize(format))
            .map(|factory| factory())
            .ok_or_else(|| Error::UnsupportedFormat {
                format: format.to_string(),
                supported: self.supported_formats().join(", "),
            })
    }

    pub fn is_supported(&self, format: &str) -> bool {
        self.factories.contains_key(&normalize(format))
    }

    /// Every registered name, sorted.
    pub fn supported_formats(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Add or replace the factory for `format`.
    pub fn register(&mut self, format: &str, factory: GeneratorFactory) {
        self.factories.insert(normalize(format), factory);
    }

    /// Remove `format`. Returns whether it was registered.
    pub fn unregister(&mut self, format: &str) -> bool {
        self.factories.remove(&normalize(format)).is_some()
    }
}

impl Default for GeneratorRegistry {
    /// The built-in formats: tree-text, JSON, HTML and consolidated.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register_default(TreeTextGenerator);
        registry.register_default(JsonGenerator);
        registry.register_default(HtmlGenerator);
        registry.register_default(ConsolidatedGenerator);
        registry
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("formats", &self.supported_formats())
            .finish()
    }
}
