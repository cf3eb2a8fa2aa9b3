//! Named output formats
//!
//! Tools that let a user pick an output format by name (`bali`, `treeviz`, `json`,
//! `yaml`) look it up here instead of matching on strings themselves.

use std::collections::HashMap;
use std::fmt;

use super::{format_canonical, serialized, to_treeviz_str};
use crate::bali::ast::Document;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No format registered under that name
    FormatNotFound(String),
    /// The format failed to render the document
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// A way of rendering a document as text.
pub trait Format: Send + Sync {
    fn name(&self) -> &str;

    fn serialize(&self, document: &Document) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

pub struct Canonical;

impl Format for Canonical {
    fn name(&self) -> &str {
        "bali"
    }

    fn serialize(&self, document: &Document) -> Result<String, FormatError> {
        Ok(format_canonical(document))
    }

    fn description(&self) -> &str {
        "Canonical Bali source"
    }
}

pub struct Treeviz;

impl Format for Treeviz {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, document: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(document))
    }

    fn description(&self) -> &str {
        "One line per node outline"
    }
}

pub struct Json;

impl Format for Json {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, document: &Document) -> Result<String, FormatError> {
        serialized::to_json(document).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

pub struct Yaml;

impl Format for Yaml {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, document: &Document) -> Result<String, FormatError> {
        serialized::to_yaml(document).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format, replacing any format of the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats.insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Format> {
        self.formats.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    pub fn serialize(&self, document: &Document, name: &str) -> Result<String, FormatError> {
        let format = self
            .get(name)
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))?;
        format.serialize(document)
    }

    /// Registered names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Canonical);
        registry.register(Treeviz);
        registry.register(Json);
        registry.register(Yaml);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bali::parsing::parse;

    struct Shouting;

    impl Format for Shouting {
        fn name(&self) -> &str {
            "bali"
        }

        fn serialize(&self, document: &Document) -> Result<String, FormatError> {
            Ok(format_canonical(document).to_uppercase())
        }
    }

    #[test]
    fn defaults_are_registered() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.list_formats(),
            vec!["bali", "json", "treeviz", "yaml"]
        );
    }

    #[test]
    fn serialize_by_name() {
        let registry = FormatRegistry::with_defaults();
        let document = parse("[ 1,2 ]").unwrap();
        assert_eq!(registry.serialize(&document, "bali").unwrap(), "[1, 2]");
        assert!(registry
            .serialize(&document, "treeviz")
            .unwrap()
            .starts_with("Document\n"));
    }

    #[test]
    fn unknown_format() {
        let registry = FormatRegistry::new();
        let document = parse("[ ]").unwrap();
        assert_eq!(
            registry.serialize(&document, "xml"),
            Err(FormatError::FormatNotFound("xml".to_string()))
        );
    }

    #[test]
    fn registering_replaces_by_name() {
        let mut registry = FormatRegistry::with_defaults();
        registry.register(Shouting);
        let document = parse("[true]").unwrap();
        assert_eq!(registry.serialize(&document, "bali").unwrap(), "[TRUE]");
        assert!(!registry.has("shouting"));
    }
}
