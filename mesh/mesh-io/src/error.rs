//! Error types for mesh I/O operations.

use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during mesh I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Unknown file format (unrecognized extension).
    #[error("unknown file format: .{extension}")]
    UnknownFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// Invalid file content, or a mesh that cannot be encoded.
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// Invalid header in binary STL.
    #[error("invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Expected header size.
        expected: usize,
        /// Actual header size.
        got: usize,
    },

    /// Invalid face count.
    #[error("invalid face count: expected {expected}, got {got}")]
    InvalidFaceCount {
        /// Expected number of faces.
        expected: u32,
        /// Actual number of faces read.
        got: u32,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Float parsing error in an ASCII format.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// ZIP container error.
    #[error("ZIP error: {message}")]
    Zip {
        /// Description from the archive layer.
        message: String,
    },

    /// XML reading or writing error.
    #[error("XML error: {message}")]
    Xml {
        /// Description from the XML layer.
        message: String,
    },

    /// The finished file could not be moved into place.
    #[error("failed to persist {path}: {source}")]
    Persist {
        /// Destination path.
        path: PathBuf,
        /// Underlying rename failure.
        source: std::io::Error,
    },
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    /// Create a `Zip` error from an archive-layer failure.
    pub(crate) fn zip(err: impl Display) -> Self {
        Self::Zip {
            message: err.to_string(),
        }
    }

    /// Create an `Xml` error from an XML-layer failure.
    pub(crate) fn xml(err: impl Display) -> Self {
        Self::Xml {
            message: err.to_string(),
        }
    }

    /// Map an open failure to `FileNotFound` when the file is missing.
    pub(crate) fn from_open(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = IoError::invalid_content("bad triangle");
        assert_eq!(err.to_string(), "invalid file content: bad triangle");

        let err = IoError::zip("truncated central directory");
        assert!(err.to_string().starts_with("ZIP error"));
    }

    #[test]
    fn missing_file_maps_to_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = IoError::from_open(io, std::path::Path::new("a.stl"));
        assert!(matches!(err, IoError::FileNotFound { .. }));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        let err = IoError::from_open(io, std::path::Path::new("a.stl"));
        assert!(matches!(err, IoError::Io(_)));
    }
}
