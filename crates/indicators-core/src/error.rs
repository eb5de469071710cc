//! Error taxonomy for index generation.
//!
//! Every failure is fatal for a run: there is no retry and no partial output,
//! so each variant carries the path needed to find the offending entry.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while discovering, loading, or persisting the index.
#[derive(Error, Debug)]
pub enum IndexError {
    /// A directory listing failed (missing path, permissions).
    #[error("failed to list directory '{}': {source}", path.display())]
    Discovery {
        /// Directory that could not be listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A descriptor file could not be read.
    #[error("failed to read descriptor '{}': {source}", path.display())]
    Read {
        /// Descriptor that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A descriptor is not well-formed YAML.
    #[error("failed to parse descriptor '{}': {source}", path.display())]
    Parse {
        /// Descriptor that failed to parse.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A descriptor parsed, but its top level is not a key/value mapping.
    #[error("descriptor '{}' is not a mapping", path.display())]
    NotAMapping {
        /// Offending descriptor.
        path: PathBuf,
    },

    /// The index could not be serialized to JSON.
    #[error("failed to serialize index: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The output artifact could not be persisted.
    #[error("failed to write index '{}': {source}", path.display())]
    Write {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl IndexError {
    /// True for failures caused by descriptor contents rather than I/O.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::NotAMapping { .. })
    }
}
