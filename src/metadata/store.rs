//! Loading and saving the description document

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::fs::FileSystem;

use super::Metadata;

/// Reads and writes [`Metadata`] documents through a [`FileSystem`].
pub struct MetadataStore<F> {
    fs: F,
}

impl<F: FileSystem> MetadataStore<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.fs.exists(path)
    }

    /// Load the document at `path`.
    ///
    /// Never fails: a missing file gives empty metadata, and an unreadable or
    /// malformed one is logged and also treated as empty, so a following
    /// backfill rebuilds it.
    pub fn load(&self, path: &Path) -> Metadata {
        if !self.fs.exists(path) {
            debug!("no metadata at {}, starting empty", path.display());
            return Metadata::new();
        }
        let raw = match self.fs.read_to_string(path) {
            Ok(raw) => raw,
            Err(source) => {
                warn!("{}; starting with empty metadata", Error::io(path, source));
                return Metadata::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(metadata) => metadata,
            Err(source) => {
                let err = Error::MetadataParse {
                    path: path.to_path_buf(),
                    source,
                };
                warn!("{err}; starting with empty metadata");
                Metadata::new()
            }
        }
    }

    /// Overwrite the document at `path` with `metadata`.
    pub fn save(&self, path: &Path, metadata: &Metadata) -> Result<()> {
        let mut json = serde_json::to_string_pretty(metadata)?;
        json.push('\n');
        self.fs
            .write(path, &json)
            .map_err(|source| Error::MetadataWrite {
                path: path.to_path_buf(),
                source,
            })?;
        info!("metadata written to {}", path.display());
        Ok(())
    }
}
