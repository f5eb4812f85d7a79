use std::path::PathBuf;

use thiserror::Error;

use crate::types::ConfigFormat;

/// Boxed error produced by one of the format engines.
pub type FormatError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path} as {format}: {source}")]
    ParseError {
        path: PathBuf,
        format: ConfigFormat,
        source: FormatError,
    },

    #[error("Failed to render {path} as {format}: {source}")]
    RenderError {
        path: PathBuf,
        format: ConfigFormat,
        source: FormatError,
    },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Cannot transform '{key}': {source}")]
    Transform {
        key: String,
        source: TransformError,
    },

    #[error("No default config registered while accessing '{key}'; call set_default_config() first")]
    NoDefaultConfig { key: String },

    #[error("A config key path needs at least one segment")]
    EmptyPath,

    #[error("Cannot infer the config format of {path}; call .format() on the builder")]
    UnknownFormat { path: PathBuf },

    #[error("Could not resolve config location {0}")]
    UnresolvedLocation(String),
}

/// Why a [`Transformer`](crate::Transformer) rejected a node.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("expected a list, found {found}")]
    NotAList { found: &'static str },

    #[error("expected a map, found {found}")]
    NotAMap { found: &'static str },

    #[error("list element {index}: {source}")]
    Element {
        index: usize,
        source: serde_json::Error,
    },

    #[error("map key '{key}': {reason}")]
    EntryKey { key: String, reason: String },

    #[error("map entry '{key}': {source}")]
    EntryValue {
        key: String,
        source: serde_json::Error,
    },
}
