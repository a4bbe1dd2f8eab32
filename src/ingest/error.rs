//! Ingest error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading transaction data
#[derive(Error, Debug)]
pub enum IngestError {
    /// Transaction file could not be read
    #[error("Failed to read {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    /// Transaction document is not well-formed XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// A classification pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for ingest operations
pub type IngestResult<T> = Result<T, IngestError>;
