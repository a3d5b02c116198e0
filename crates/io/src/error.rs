//! Error types for binary (de)serialization.

use thiserror::Error;

/// Errors raised while reading or writing Neo's binary wire format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IoError {
    /// The reader ran out of bytes before satisfying a read.
    #[error("end of stream: needed {needed} more byte(s) in {context}")]
    EndOfStream { needed: usize, context: String },

    /// A value did not have the expected shape (e.g. an invalid varint
    /// length prefix, or a count exceeding a size cap).
    #[error("format error in {op}: {message}")]
    FormatException { op: String, message: String },

    /// An operation was attempted that the reader/writer state disallows.
    #[error("invalid operation in {op}: {message}")]
    InvalidOperation { op: String, message: String },
}

impl IoError {
    pub fn end_of_stream(needed: usize, context: &str) -> Self {
        Self::EndOfStream {
            needed,
            context: context.to_string(),
        }
    }

    pub fn format_exception(op: &str, message: &str) -> Self {
        Self::FormatException {
            op: op.to_string(),
            message: message.to_string(),
        }
    }

    pub fn invalid_operation(op: &str, message: &str) -> Self {
        Self::InvalidOperation {
            op: op.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<std::array::TryFromSliceError> for IoError {
    fn from(e: std::array::TryFromSliceError) -> Self {
        Self::format_exception("slice conversion", &e.to_string())
    }
}

/// Convenience alias used throughout the interop layer's IO code.
pub type IoResult<T> = Result<T, IoError>;
