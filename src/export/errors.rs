/// Errors from the export layer.
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing posts to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output file could not be created (missing directory, permissions, ...).
    #[error("Cannot create output file '{}': {source}", path.display())]
    Create {
        /// Requested output path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Writing or flushing rows failed part-way.
    #[error("Failed writing to '{}': {source}", path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
