//! Discovery of descriptor files across the two-level data tree.
//!
//! Layout: `<data_root>/<category>/<descriptor>.yaml`. Categories are listed
//! concurrently, but results keep category-major, file-minor order.

use futures::future::try_join_all;
use std::io;
use std::path::Path;
use tokio::fs;

use crate::classify::{is_category_dir, is_descriptor_file};
use crate::config::IndexConfig;
use crate::error::IndexError;
use crate::reference::{DescriptorReference, ReferenceBuilder};

/// List entry names of `dir` in the order the filesystem returns them.
///
/// # Errors
///
/// Returns [`IndexError::Discovery`] if the directory cannot be listed or
/// holds an entry whose name is not valid UTF-8.
pub async fn list_entry_names(dir: &Path) -> Result<Vec<String>, IndexError> {
    let discovery = |source| IndexError::Discovery {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(discovery)?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(discovery)? {
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                return Err(IndexError::Discovery {
                    path: dir.join(&raw),
                    source: io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("entry name {raw:?} is not valid UTF-8"),
                    ),
                });
            }
        }
    }
    Ok(names)
}

/// Walk the data tree and build one reference per descriptor file.
///
/// With `config.sort_entries` set, category and file names are sorted;
/// otherwise the raw listing order is kept.
///
/// # Errors
///
/// Returns [`IndexError::Discovery`] if the root or any category directory
/// cannot be listed. No partial result is returned.
pub async fn scan_tree(config: &IndexConfig) -> Result<Vec<DescriptorReference>, IndexError> {
    let root = config.data_root();
    let builder = ReferenceBuilder::from_config(config);

    let mut categories: Vec<String> = list_entry_names(root)
        .await?
        .into_iter()
        .filter(|name| is_category_dir(name))
        .collect();
    if config.sort_entries {
        categories.sort();
    }
    tracing::info!("found {} categories in {}", categories.len(), root.display());

    let per_category = try_join_all(categories.iter().map(|category| {
        let builder = &builder;
        async move {
            let mut files: Vec<String> = list_entry_names(&root.join(category))
                .await?
                .into_iter()
                .filter(|name| is_descriptor_file(name))
                .collect();
            if config.sort_entries {
                files.sort();
            }
            tracing::debug!("{category}: {} descriptors", files.len());

            Ok::<_, IndexError>(
                files
                    .iter()
                    .map(|file| builder.build(category, file))
                    .collect::<Vec<_>>(),
            )
        }
    }))
    .await?;

    Ok(per_category.into_iter().flatten().collect())
}
