//! TreeScanner - builds a structure tree from a directory on disk

use std::path::Path;

use tracing::{debug, warn};

use crate::error::Error;
use crate::fs::{EntryKind, FileSystem};
use crate::names::{NameMap, sort_names};

use super::config::ScanConfig;
use super::node::StructureNode;

/// Totals gathered during a scan.
///
/// `degraded` counts entries that were left out because they could not be
/// read or stat'ed, so callers can tell an empty tree from a failed one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub dirs: usize,
    pub files: usize,
    pub degraded: usize,
}

impl ScanReport {
    pub fn is_degraded(&self) -> bool {
        self.degraded > 0
    }
}

/// Read-only walker producing a [`StructureNode`] tree.
pub struct TreeScanner<F> {
    fs: F,
    config: ScanConfig,
}

impl<F: FileSystem> TreeScanner<F> {
    pub fn new(fs: F, config: ScanConfig) -> Self {
        Self { fs, config }
    }

    pub fn scan(&self, root: &Path) -> StructureNode {
        self.scan_with_report(root).0
    }

    pub fn scan_with_report(&self, root: &Path) -> (StructureNode, ScanReport) {
        let mut report = ScanReport::default();
        let tree = self.scan_dir(root, 0, &mut report);
        debug!(
            root = %root.display(),
            dirs = report.dirs,
            files = report.files,
            degraded = report.degraded,
            "scan finished"
        );
        (tree, report)
    }

    fn scan_dir(&self, path: &Path, depth: usize, report: &mut ScanReport) -> StructureNode {
        let mut names = match self.fs.read_dir(path) {
            Ok(names) => names,
            Err(source) => {
                warn!("{}", Error::scan_io(path, source));
                report.degraded += 1;
                return StructureNode::empty_dir();
            }
        };

        if depth > 0 {
            if let Some(max) = self.config.max_entries {
                if names.len() > max {
                    warn!(
                        "skipping {}: {} entries exceeds the limit of {}",
                        path.display(),
                        names.len(),
                        max
                    );
                    report.degraded += 1;
                    return StructureNode::empty_dir();
                }
            }
        }

        sort_names(&mut names);

        let mut children = NameMap::new();
        for name in names {
            if self.config.exclude.contains(&name) {
                debug!("excluded {}", path.join(&name).display());
                continue;
            }
            let child_path = path.join(&name);
            match self.fs.stat(&child_path) {
                Ok(EntryKind::Dir) => {
                    report.dirs += 1;
                    let child = self.scan_dir(&child_path, depth + 1, report);
                    children.insert(name, child);
                }
                Ok(EntryKind::File) => {
                    report.files += 1;
                    children.insert(name, StructureNode::File);
                }
                Err(source) => {
                    warn!("{}", Error::scan_io(&child_path, source));
                    report.degraded += 1;
                }
            }
        }

        StructureNode::Dir(children)
    }
}
