//! Name-based predicates for directory entries.

use std::path::Path;

/// Leading character of hidden entries (`.git`, `.DS_Store`).
pub const HIDDEN_MARKER: char = '.';

/// Extension of descriptor documents.
pub const DESCRIPTOR_EXTENSION: &str = "yaml";

/// True if a root-level entry names a category directory: not hidden and
/// without a file extension.
pub fn is_category_dir(name: &str) -> bool {
    !name.starts_with(HIDDEN_MARKER) && Path::new(name).extension().is_none()
}

/// True if an entry inside a category directory is a descriptor document.
pub fn is_descriptor_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext == DESCRIPTOR_EXTENSION)
}
