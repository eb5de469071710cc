//! Derivation of local paths and public URLs for descriptors.

use std::path::{Path, PathBuf};

use crate::config::IndexConfig;

/// Extension of the data file a descriptor documents.
pub const DATA_EXTENSION: &str = "csv";

/// Where a descriptor lives on disk and where its data file is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorReference {
    /// `<data_root>/<category>/<descriptor>.yaml`
    pub local_path: PathBuf,
    /// `<base_url>/<category>/<stem>.csv`
    pub source_url: String,
}

/// Builds [`DescriptorReference`] values from a fixed data root and base URL.
#[derive(Debug, Clone)]
pub struct ReferenceBuilder {
    data_root: PathBuf,
    base_url: String,
}

impl ReferenceBuilder {
    /// Create a builder. A trailing `/` on `base_url` is dropped.
    pub fn new(data_root: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            data_root: data_root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builder for the data root and base URL of a run.
    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(config.data_root(), &config.base_url)
    }

    /// Local path of `filename` inside `category`.
    pub fn local_path(&self, category: &str, filename: &str) -> PathBuf {
        self.data_root.join(category).join(filename)
    }

    /// Public URL of the data file sharing the descriptor's stem.
    pub fn source_url(&self, category: &str, filename: &str) -> String {
        let stem = Path::new(filename)
            .file_stem()
            .map_or_else(|| filename.into(), |s| s.to_string_lossy());
        format!("{}/{category}/{stem}.{DATA_EXTENSION}", self.base_url)
    }

    /// Both derivations for one descriptor.
    pub fn build(&self, category: &str, filename: &str) -> DescriptorReference {
        DescriptorReference {
            local_path: self.local_path(category, filename),
            source_url: self.source_url(category, filename),
        }
    }
}
