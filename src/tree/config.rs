//! Configuration types for tree scanning

use crate::names::NameSet;

/// Names skipped by the CLI unless told otherwise.
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", ".git", "target"];

/// Directory size limit used when collecting paths for description backfill.
pub const DEFAULT_BACKFILL_MAX_ENTRIES: usize = 100;

/// Configuration for tree scanning behavior.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Entries with these names are skipped at any depth, files and directories alike.
    pub exclude: NameSet,
    /// Directories below the root with more children than this are recorded
    /// empty instead of being descended into.
    pub max_entries: Option<usize>,
}

impl ScanConfig {
    pub fn excluding<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            exclude: NameSet::new(names),
            ..Default::default()
        }
    }

    pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries;
        self
    }
}
