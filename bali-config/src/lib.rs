//! Shared configuration loader for the Bali notation toolchain.
//!
//! `defaults/bali.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`BaliConfig`].

use bali_notation::bali::parsing::ParserOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/bali.default.toml");

/// Top-level configuration consumed by Bali applications.
#[derive(Debug, Clone, Deserialize)]
pub struct BaliConfig {
    pub scanner: ScannerConfig,
}

/// How source text is turned into tokens for the parser.
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    pub concurrent: bool,
    pub queue_capacity: usize,
}

impl BaliConfig {
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            concurrent: self.scanner.concurrent,
            queue_capacity: self.scanner.queue_capacity,
        }
    }
}

/// Layers user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file that may not exist.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a command line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<BaliConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// For callers that only need the defaults.
pub fn load_defaults() -> Result<BaliConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_parser_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.scanner.concurrent);
        assert_eq!(config.scanner.queue_capacity, 64);
        assert_eq!(config.parser_options(), ParserOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("scanner.concurrent", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(!config.parser_options().concurrent);
    }

    #[test]
    fn user_files_layer_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[scanner]\nqueue_capacity = 8").expect("write config");
        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.scanner.queue_capacity, 8);
        assert!(config.scanner.concurrent);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = Loader::new()
            .with_optional_file(dir.path().join("absent.toml"))
            .build()
            .expect("config to build");
        assert_eq!(config.scanner.queue_capacity, 64);
    }

    #[test]
    fn missing_required_file_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = Loader::new()
            .with_file(dir.path().join("absent.toml"))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn parsing_with_loaded_options() {
        let config = Loader::new()
            .set_override("scanner.concurrent", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let document = bali_notation::bali::parsing::parse_with("[1, 2]", &config.parser_options())
            .expect("source to parse");
        assert_eq!(
            bali_notation::bali::formats::format_canonical(&document),
            "[1, 2]"
        );
    }
}
