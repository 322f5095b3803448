//! Centralized error types for mailtable.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the mailtable library.
#[derive(Error, Debug)]
pub enum MailTableError {
    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The binary stream ended before a field could be read completely.
    #[error("Truncated input: {field} at offset {offset} runs past the end of the data")]
    TruncatedInput { field: &'static str, offset: usize },

    /// A line of the text form could not be parsed.
    #[error("Malformed input at line {line}: {reason}")]
    MalformedField { line: usize, reason: String },

    /// A record value cannot be represented in the binary layout.
    #[error("Invalid {field}: {reason}")]
    InvalidEntry { field: &'static str, reason: String },

    /// The declared entry count is larger than the number of records present.
    #[error("Entry count mismatch: header declares {declared} entries but only {found} are present")]
    CountMismatch { declared: u32, found: u32 },

    /// Data remains after the declared number of records was decoded.
    #[error("Entry count mismatch: {remaining} byte(s) remain after the {declared} declared entries")]
    TrailingBytes { declared: u32, remaining: usize },
}

/// Convenience alias for `Result<T, MailTableError>`.
pub type Result<T> = std::result::Result<T, MailTableError>;

impl MailTableError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedField {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            field,
            reason: reason.into(),
        }
    }
}
