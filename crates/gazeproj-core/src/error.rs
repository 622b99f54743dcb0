//! Error types for gazeproj.

use gazeproj_types::{BoxError, InvalidSelector};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for project loading and session operations.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to construct session {position}: {source}")]
    SessionConstruction {
        position: usize,
        #[source]
        source: BoxError,
    },

    #[error(transparent)]
    Indexing(#[from] IndexingError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The project root is missing, empty, or lacks a descriptor.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Project directory is empty: {0}")]
    EmptyRoot(PathBuf),

    #[error("Cannot read project directory {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No descriptor file (*.{extension}) in {root}")]
    MissingDescriptor { root: PathBuf, extension: String },
}

/// The descriptor file could not be turned into session entries.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Cannot read descriptor {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Descriptor is {len} bytes, shorter than its {header_len}-byte header")]
    Truncated { len: usize, header_len: usize },

    #[error("Descriptor contains bytes with no mapping in {encoding}")]
    Encoding { encoding: &'static str },

    #[error("Descriptor YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Descriptor document is a {found}, expected a mapping")]
    NotAMapping { found: &'static str },

    #[error("Descriptor has no `{key}` key")]
    MissingKey { key: String },

    #[error("Descriptor `{key}` is a {found}, expected a sequence")]
    NotASequence { key: String, found: &'static str },

    #[error("Descriptor entry {position} is a {found}, expected a mapping")]
    EntryNotMapping { position: usize, found: &'static str },
}

/// A session position or key could not be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexingError {
    #[error("Session index {index} out of range for {len} sessions")]
    OutOfRange { index: usize, len: usize },

    #[error(transparent)]
    InvalidKey(#[from] InvalidSelector),
}

/// Session info records could not be combined into one table.
#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("Session {position} failed to report info: {source}")]
    Info {
        position: usize,
        #[source]
        source: BoxError,
    },

    #[error("Session {position} info has no `index` field")]
    MissingIndex { position: usize },

    #[error("Sessions {first} and {second} both report index {index}")]
    DuplicateIndex {
        index: String,
        first: usize,
        second: usize,
    },
}

/// A per-session batch operation failed; the batch stopped there.
#[derive(Error, Debug)]
#[error("{operation} failed on session {position} after {completed} completed: {source}")]
pub struct OperationError {
    pub operation: Operation,
    pub position: usize,
    /// Sessions that finished before the failing one.
    pub completed: usize,
    #[source]
    pub source: BoxError,
}

/// Batch operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Export,
    Split,
    Annotate,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Export => "export",
            Operation::Split => "split",
            Operation::Annotate => "annotate",
        };
        f.write_str(name)
    }
}

/// Configuration file problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown descriptor encoding: {0}")]
    UnknownEncoding(String),
}
