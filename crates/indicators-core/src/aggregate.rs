//! Index aggregation: scan, load every descriptor, persist one JSON array.

use futures::future::try_join_all;
use serde::Serialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::IndexConfig;
use crate::descriptor::{Descriptor, load_descriptor};
use crate::error::IndexError;
use crate::reference::DescriptorReference;
use crate::scan::scan_tree;

/// Ordered list of augmented descriptors, serialized as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Index {
    entries: Vec<Descriptor>,
}

impl Index {
    /// Wrap descriptors already in discovery order.
    pub fn new(entries: Vec<Descriptor>) -> Self {
        Self { entries }
    }

    /// Descriptors in discovery order.
    pub fn entries(&self) -> &[Descriptor] {
        &self.entries
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no descriptor was found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON (two-space indent).
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, IndexError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Atomically replace `path` with this index.
    ///
    /// The JSON is written to a sibling temporary file which is then renamed
    /// over `path`, so readers never observe a partially written index.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Serialize`] or [`IndexError::Write`]. On error the
    /// previous file at `path` is left untouched.
    pub async fn save(&self, path: &Path) -> Result<(), IndexError> {
        let content = self.to_json()?;
        let write_err = |source| IndexError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let temp_path = temp_path_for(path);
        let persisted = match fs::write(&temp_path, &content).await {
            Ok(()) => fs::rename(&temp_path, path).await,
            Err(source) => Err(source),
        };
        if let Err(source) = persisted {
            // Drop whatever part of the temp file made it to disk.
            let _ = fs::remove_file(&temp_path).await;
            return Err(write_err(source));
        }

        Ok(())
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexReport {
    /// Where the index was written.
    pub output_path: PathBuf,
    /// Number of descriptors written.
    pub entries: usize,
}

/// Run `loader` for every reference concurrently and collect the results in
/// reference order.
///
/// All loads are issued at once. The first failure aborts the batch.
///
/// # Errors
///
/// Returns the first error produced by `loader`.
pub async fn load_all<'a, F, Fut>(
    references: &'a [DescriptorReference],
    loader: F,
) -> Result<Vec<Descriptor>, IndexError>
where
    F: Fn(&'a DescriptorReference) -> Fut,
    Fut: Future<Output = Result<Descriptor, IndexError>>,
{
    try_join_all(references.iter().map(loader)).await
}

/// Scan the tree and load every descriptor into an [`Index`].
///
/// # Errors
///
/// Returns the first discovery, read, or parse error encountered.
pub async fn build_index(config: &IndexConfig) -> Result<Index, IndexError> {
    let references = scan_tree(config).await?;
    tracing::info!("loading {} descriptors", references.len());

    let entries = load_all(&references, load_descriptor).await?;
    Ok(Index::new(entries))
}

/// Build the index and persist it to `config.output_path`.
///
/// Nothing is written unless every descriptor loaded successfully.
///
/// # Errors
///
/// Returns the first error of any pipeline stage.
pub async fn generate_index(config: &IndexConfig) -> Result<IndexReport, IndexError> {
    let index = build_index(config).await?;
    let output_path = config.output_path();
    index.save(output_path).await?;
    tracing::info!("wrote {} entries to {}", index.len(), output_path.display());

    Ok(IndexReport {
        output_path: output_path.to_path_buf(),
        entries: index.len(),
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
