//! Builds the indicators index: one JSON array aggregating every dataset
//! descriptor found under `<data_root>/<category>/<name>.yaml`.
//!
//! # Pipeline
//!
//! - [`scan::scan_tree`] lists categories and descriptor files and derives a
//!   [`DescriptorReference`] for each (local path + public CSV URL).
//! - [`descriptor::load_descriptor`] reads and parses one descriptor and sets
//!   its `url` field.
//! - [`aggregate::generate_index`] loads all descriptors concurrently, keeps
//!   discovery order, and atomically writes the JSON artifact.
//!
//! Any error aborts the run; no partial index is ever written.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod reference;
pub mod scan;

pub use aggregate::{Index, IndexReport, build_index, generate_index, load_all};
pub use config::IndexConfig;
pub use descriptor::{Descriptor, load_descriptor};
pub use error::IndexError;
pub use reference::{DescriptorReference, ReferenceBuilder};
pub use scan::scan_tree;
