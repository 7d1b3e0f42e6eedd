//! Error types for save-file decoding.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Versioned record kinds that are checked against [`crate::SUPPORTED_VERSION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Substrate,
    Cell,
    Gene,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substrate => write!(f, "substrate"),
            Self::Cell => write!(f, "cell"),
            Self::Gene => write!(f, "gene"),
        }
    }
}

/// Errors that can occur when decoding a save file.
///
/// Every variant is fatal: offsets of later fields depend on earlier ones, so
/// nothing after the failing field can be trusted.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The stream does not start with the object-stream magic.
    #[error("missing stream magic: found {}", hex_bytes(.found))]
    MissingMagic { found: Vec<u8> },

    /// A framing byte other than a short or long block tag.
    #[error("unexpected tag 0x{tag:02X} at offset {offset}")]
    UnexpectedTag { tag: u8, offset: usize },

    /// A record version differs from the supported constant.
    #[error("unsupported {record} version {found} (expected {expected})")]
    UnsupportedVersion {
        record: RecordKind,
        found: i32,
        expected: i32,
    },

    /// Fewer bytes remain than a field or block declares.
    #[error("unexpected end of data at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEndOfData {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// The secondary payload cannot be inflated.
    #[error("failed to decompress payload: {message}")]
    DecompressionFailure { message: String },

    /// A count field decoded to a negative value.
    #[error("count field {field} is negative: {value}")]
    NegativeCount { field: String, value: i64 },

    /// A repetition refers to a count field that has not been decoded.
    #[error("repetition count field {field} has not been decoded")]
    UnknownCountField { field: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

impl DecodeError {
    /// Create an UnsupportedVersion error against the supported constant.
    pub fn unsupported_version(record: RecordKind, found: i32) -> Self {
        Self::UnsupportedVersion {
            record,
            found,
            expected: crate::SUPPORTED_VERSION,
        }
    }

    /// Create a DecompressionFailure error.
    pub fn decompression(message: impl Into<String>) -> Self {
        Self::DecompressionFailure {
            message: message.into(),
        }
    }

    /// Create a NegativeCount error.
    pub fn negative_count(field: impl Into<String>, value: i64) -> Self {
        Self::NegativeCount {
            field: field.into(),
            value,
        }
    }
}

fn hex_bytes(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "<empty>".to_string();
    }
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DecodeError::MissingMagic {
            found: vec![0xDE, 0xAD],
        };
        assert_eq!(format!("{err}"), "missing stream magic: found DE AD");

        let err = DecodeError::UnexpectedTag {
            tag: 0x70,
            offset: 12,
        };
        assert_eq!(format!("{err}"), "unexpected tag 0x70 at offset 12");

        let err = DecodeError::unsupported_version(RecordKind::Gene, 94);
        assert_eq!(format!("{err}"), "unsupported gene version 94 (expected 95)");
    }

    #[test]
    fn test_empty_magic_display() {
        let err = DecodeError::MissingMagic { found: Vec::new() };
        assert!(format!("{err}").ends_with("<empty>"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err: DecodeError = io_err.into();
        assert!(matches!(err, DecodeError::Io(_)));
    }
}
