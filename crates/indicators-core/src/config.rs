//! Run configuration.
//!
//! The defaults reproduce the fixed layout of the indicators repository, so a
//! run with `IndexConfig::default()` needs no parameters at all.

use std::path::{Path, PathBuf};

/// Directory holding one sub-directory per category, relative to the repo root.
pub const DEFAULT_DATA_ROOT: &str = "ds/data/processed";

/// Output artifact read by the front-end.
pub const DEFAULT_OUTPUT_PATH: &str = "ui/static/indicators.json";

/// Public base URL mirroring [`DEFAULT_DATA_ROOT`].
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/nestauk/beis-indicators/dev/ds/data/processed";

/// Settings for one index generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Root of the `<category>/<descriptor>.yaml` tree.
    pub data_root: PathBuf,
    /// Where the JSON index is written.
    pub output_path: PathBuf,
    /// Base URL prepended to `<category>/<stem>.csv`.
    pub base_url: String,
    /// Sort category and descriptor names instead of keeping listing order.
    pub sort_entries: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from(DEFAULT_DATA_ROOT),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            base_url: DEFAULT_BASE_URL.to_string(),
            sort_entries: false,
        }
    }
}

impl IndexConfig {
    /// Override the data root.
    pub fn with_data_root(mut self, data_root: impl Into<PathBuf>) -> Self {
        self.data_root = data_root.into();
        self
    }

    /// Override the output artifact path.
    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    /// Override the base URL. A trailing `/` is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Enable or disable name sorting during discovery.
    pub fn with_sorted_entries(mut self, sort_entries: bool) -> Self {
        self.sort_entries = sort_entries;
        self
    }

    /// Data root as a path.
    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Output artifact as a path.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
