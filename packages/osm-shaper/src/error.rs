//! Error types for the shaper.
//!
//! Only I/O-layer failures are errors. Rejected elements and rejected
//! subfields are ordinary outcomes (see [`crate::shaper::ShapeOutcome`] and
//! [`crate::cleaning::Subfield`]) and never surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the shaper library.
#[derive(Debug, Error)]
pub enum ShaperError {
    /// Input file does not exist.
    #[error("Input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Input path exists but is not a regular file.
    #[error("Input path is not a file: {}", .0.display())]
    InputNotAFile(PathBuf),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// The document root is not `<osm>`.
    #[error("Unexpected root element <{0}>, expected <osm>")]
    UnexpectedRoot(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for shaper operations.
pub type Result<T> = std::result::Result<T, ShaperError>;
