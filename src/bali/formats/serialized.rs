//! JSON and YAML interchange
//!
//! Every node type derives serde, so a tree can be stored or shipped without going back
//! through source text. A deserialized tree never passed through the scanner: run it
//! through [`validate`](crate::bali::validation::validate) before trusting it.

use std::fmt;

use crate::bali::ast::Document;

#[derive(Debug)]
pub enum SerializationError {
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

impl fmt::Display for SerializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializationError::Json(err) => write!(f, "JSON serialization error: {err}"),
            SerializationError::Yaml(err) => write!(f, "YAML serialization error: {err}"),
        }
    }
}

impl std::error::Error for SerializationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerializationError::Json(err) => Some(err),
            SerializationError::Yaml(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        SerializationError::Json(err)
    }
}

impl From<serde_yaml::Error> for SerializationError {
    fn from(err: serde_yaml::Error) -> Self {
        SerializationError::Yaml(err)
    }
}

pub fn to_json(document: &Document) -> Result<String, SerializationError> {
    Ok(serde_json::to_string_pretty(document)?)
}

pub fn from_json(text: &str) -> Result<Document, SerializationError> {
    Ok(serde_json::from_str(text)?)
}

// YAML goes through a JSON value: serde_yaml cannot write a variant whose payload is
// itself a variant as nested tags, and the tree is full of those.
pub fn to_yaml(document: &Document) -> Result<String, SerializationError> {
    let value = serde_json::to_value(document)?;
    Ok(serde_yaml::to_string(&value)?)
}

pub fn from_yaml(text: &str) -> Result<Document, SerializationError> {
    let value: serde_json::Value = serde_yaml::from_str(text)?;
    Ok(serde_json::from_value(value)?)
}
