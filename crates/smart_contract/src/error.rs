//! Error type for `neo-smart-contract`: the fail conditions a syscall
//! handler can report, normalized per spec.md §7.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// No handler is registered for the invoked method identifier.
    #[error("unknown method identifier {id:#010x}")]
    UnknownMethod { id: u32 },

    /// A handler's argument count or shape didn't match what it expects.
    #[error("invalid arguments to {method}: {reason}")]
    InvalidArguments { method: &'static str, reason: String },

    /// An index fell outside the bounds it was checked against.
    #[error("index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: i64, len: usize },

    /// A storage mutation was attempted through a context that forbids it.
    #[error("storage write rejected: {reason}")]
    StorageWriteRejected { reason: &'static str },

    /// The storage key exceeded `MAX_STORAGE_KEY_SIZE`.
    #[error("storage key of {len} bytes exceeds the {limit} byte cap")]
    StorageKeyTooLarge { len: usize, limit: usize },

    /// `Contract.GetStorageContext` was called by a script that is not on
    /// record as the target contract's creator.
    #[error("script {caller} is not the recorded creator of contract {target}")]
    NotContractCreator {
        caller: neo_core::UInt160,
        target: neo_core::UInt160,
    },

    /// No contract is on record for the given script hash.
    #[error("no contract recorded for script hash {0}")]
    UnknownContract(neo_core::UInt160),

    /// The requested gas exceeds the session's remaining budget.
    #[error("gas exhausted: needed {needed}, {remaining} remaining")]
    GasExhausted { needed: i64, remaining: i64 },

    /// A syscall that requires one trigger kind ran under another.
    #[error("{method} requires {expected:?}, session is running under {actual:?}")]
    WrongTrigger {
        method: &'static str,
        expected: &'static str,
        actual: neo_vm::TriggerType,
    },

    /// A handle popped from the stack wasn't the kind the handler expects.
    #[error(transparent)]
    Vm(#[from] neo_vm::VmError),

    /// Wire-format I/O failure underneath a serializable type.
    #[error(transparent)]
    Io(#[from] neo_io::IoError),
}

pub type Result<T> = std::result::Result<T, Error>;
