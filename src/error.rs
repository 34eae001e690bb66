//! Error types shared by the library and the CLI

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The desired-structure document does not exist.
    #[error("structure config not found: {}", .path.display())]
    ConfigMissing { path: PathBuf },

    /// The desired-structure document is not valid JSON of the expected shape.
    #[error("failed to parse structure config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The metadata document is not valid JSON of the expected shape.
    #[error("failed to parse metadata {}: {source}", .path.display())]
    MetadataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A directory or file could not be listed or stat'ed during a walk.
    #[error("cannot read {}: {source}", .path.display())]
    ScanIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write metadata {}: {source}", .path.display())]
    MetadataWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O failure at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn scan_io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::ScanIo {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
