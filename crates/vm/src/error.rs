//! Error type for `neo-vm`: failures raised by the StackValue codec and
//! the typed interop-handle conversions.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmError {
    /// A container reachable from itself, or a value of an unserializable
    /// kind (`InteropHandle`), was encountered during serialization.
    #[error("operation not supported: {reason}")]
    NotSupported { reason: &'static str },

    /// The serialized form exceeded `MAX_ITEM_SIZE`.
    #[error("serialized size {size} exceeds the {limit} byte cap")]
    SizeExceeded { size: usize, limit: usize },

    /// A container header declared more elements than `MAX_ARRAY_SIZE` allows.
    #[error("container element count {count} exceeds the {limit} cap")]
    ArrayTooLarge { count: usize, limit: usize },

    /// An unrecognized tag byte was encountered while deserializing.
    #[error("malformed tag byte {tag:#04x}")]
    MalformedTag { tag: u8 },

    /// The byte stream ended before a value was fully read.
    #[error("truncated stream while reading {context}")]
    Truncated { context: &'static str },

    /// A value was asked to convert to a kind it isn't.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// An interop handle was asked to narrow to a kind it isn't holding.
    #[error("interop handle kind mismatch: expected {expected}, found {found}")]
    HandleKindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Wire-format I/O failure underneath the codec.
    #[error("io error: {0}")]
    Io(#[from] neo_io::IoError),
}

pub type VmResult<T> = std::result::Result<T, VmError>;
