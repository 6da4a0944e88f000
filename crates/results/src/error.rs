//! Error types for the results pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a parse run.
///
/// Everything else (malformed cells, short rows, unrecognized row windows)
/// is absorbed by the pipeline and never surfaces here.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input file could not be read.
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    /// No candidate encoding decoded the file without malformed sequences.
    #[error("could not decode {path} with any candidate encoding")]
    Encoding {
        /// Path of the undecodable file.
        path: PathBuf,
    },

    /// The output document could not be serialized or deserialized.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for parse operations.
pub type Result<T> = std::result::Result<T, ParseError>;
