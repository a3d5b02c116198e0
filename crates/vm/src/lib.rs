//! # Neo VM interop value layer
//!
//! The portion of the Neo Virtual Machine that crosses the syscall
//! boundary: the [`StackValue`] universe smart contracts exchange with
//! the host, its deterministic wire codec, and the handles and trigger
//! kinds host services consult while serving a syscall.
//!
//! This crate does not implement opcode execution or the evaluation
//! stack; it implements the value model and wire format that sits
//! underneath `neo-smart-contract`'s syscall dispatcher.

#![warn(rustdoc::missing_crate_level_docs)]

/// Deterministic StackValue (de)serialization.
pub mod codec;
/// VM error types and result handling.
pub mod error;
/// Typed handles an `InteropHandle` stack value may carry.
pub mod interop_handle;
/// The tagged value universe the VM pushes and pops.
pub mod stack_value;
/// The trigger kind a VM execution runs under.
pub mod trigger;

pub use codec::{
    deserialize, serialize, MAX_ARRAY_SIZE, TAG_ARRAY, TAG_BOOLEAN, TAG_BYTE_ARRAY,
    TAG_INTEGER, TAG_INTEROP_HANDLE, TAG_MAP, TAG_STRUCT,
};
pub use error::{VmError, VmResult};
pub use interop_handle::{InteropHandle, StorageContextHandle};
pub use stack_value::{ArrayRef, MapRef, StackValue};
pub use trigger::TriggerType;
