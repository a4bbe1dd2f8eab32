//! Snapshot error types

use thiserror::Error;

/// Errors that can occur while reading or writing a snapshot document
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Reading or writing the XML stream failed
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Document ended with open elements, or has no root element
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// Serialized output was not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "data.xml");
        let err: SnapshotError = io_err.into();
        assert!(matches!(err, SnapshotError::Io(_)));
        assert!(err.to_string().starts_with("IO error:"));
    }
}
