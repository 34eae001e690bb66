//! Treenote - keeps an annotated snapshot of a repository's directory layout

pub mod error;
pub mod fs;
pub mod logging;
pub mod metadata;
pub mod names;
pub mod output;
pub mod tree;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use error::{Error, Result};
pub use fs::{EntryKind, FileSystem, MemoryFs, OsFs};
pub use metadata::{BackfillReport, Metadata, MetadataEntry, MetadataStore, backfill};
pub use names::{NameMap, NameSet};
pub use output::{IndentStyle, RenderConfig, TreeLine, TreeRenderer, print_lines};
pub use tree::{
    DiffResult, RelativePath, ScanConfig, ScanReport, StructureNode, TreeScanner, compare,
    load_desired_structure,
};
