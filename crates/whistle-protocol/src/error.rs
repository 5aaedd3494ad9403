//! # Snapshot Errors
//!
//! Protocol operations fail with [`whistle_core::ProtocolError`]. This module
//! covers loading and saving public state.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reading, writing or validating a protocol snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// The snapshot parsed but violates a state invariant.
    #[error("snapshot is corrupt: {0}")]
    Corrupt(String),
}
