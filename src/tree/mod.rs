//! Directory structure model
//!
//! - `TreeScanner`: walks a directory into a [`StructureNode`] tree
//! - `compare`: diffs a desired tree against a current one
//! - `document`: reads, writes and builds structure documents

mod compare;
mod config;
mod document;
mod node;
mod scanner;

pub use compare::{DiffResult, compare};
pub use config::{DEFAULT_BACKFILL_MAX_ENTRIES, DEFAULT_EXCLUDES, ScanConfig};
pub use document::{
    BuildReport, STRUCTURE_CONFIG_FILE, build_structure, load_desired_structure,
    placeholder_file_contents, save_structure, structure_to_json,
};
pub use node::{RelativePath, StructureNode};
pub use scanner::{ScanReport, TreeScanner};
