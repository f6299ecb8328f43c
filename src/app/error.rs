//! Error and warning types for scanning and diffing inventories.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal failures. Anything in here aborts the operation.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Path not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Invalid glob pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to write inventory {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read inventory {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scan interrupted")]
    Interrupted,

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InventoryError {
    /// Wrap an I/O error, promoting `NotFound` to its own variant.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    PermissionDenied,
    BrokenSymlink,
    ReadError,
}

/// A traversal problem that skipped one entry but did not stop the scan.
#[derive(Debug, Clone)]
pub struct ScanWarning {
    pub path: Option<PathBuf>,
    pub message: String,
    pub kind: WarningKind,
}

impl ScanWarning {
    pub fn from_walk_error(err: &ignore::Error) -> Self {
        let kind = match err.io_error().map(|e| e.kind()) {
            Some(ErrorKind::PermissionDenied) => WarningKind::PermissionDenied,
            Some(ErrorKind::NotFound) => WarningKind::BrokenSymlink,
            _ => WarningKind::ReadError,
        };
        Self {
            path: walk_error_path(err),
            message: err.to_string(),
            kind,
        }
    }

    pub fn non_utf8(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
            message: "path is not valid UTF-8".to_string(),
            kind: WarningKind::ReadError,
        }
    }
}

fn walk_error_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            walk_error_path(err)
        }
        _ => None,
    }
}
