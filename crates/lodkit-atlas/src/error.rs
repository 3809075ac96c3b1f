//! Error types for atlas mapping files.

use thiserror::Error;

/// Errors raised while reading or writing mapping and candidate files.
///
/// Tile mapping itself never fails; only file handling does.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML parsing error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// Result type for atlas operations.
pub type Result<T> = std::result::Result<T, Error>;
