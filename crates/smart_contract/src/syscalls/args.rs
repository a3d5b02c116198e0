//! Shared argument-extraction helpers for syscall handlers: popped
//! arguments arrive as already-evaluated `StackValue`s (the VM's
//! evaluation-stack mechanics are out of this crate's scope, per
//! spec.md §1), so every handler needs the same few type checks.

use crate::{Error, Result};
use neo_vm::{InteropHandle, StackValue, StorageContextHandle, VmError};
use num_bigint::BigInt;

fn missing(method: &'static str, index: usize) -> Error {
    Error::InvalidArguments {
        method,
        reason: format!("expected an argument at index {index}"),
    }
}

pub(crate) fn bytes<'a>(args: &'a [StackValue], index: usize, method: &'static str) -> Result<&'a [u8]> {
    let value = args.get(index).ok_or_else(|| missing(method, index))?;
    value.as_byte_array().map_err(Error::from)
}

pub(crate) fn integer<'a>(args: &'a [StackValue], index: usize, method: &'static str) -> Result<&'a BigInt> {
    let value = args.get(index).ok_or_else(|| missing(method, index))?;
    value.as_integer().map_err(Error::from)
}

pub(crate) fn handle<'a>(
    args: &'a [StackValue],
    index: usize,
    method: &'static str,
) -> Result<&'a InteropHandle> {
    let value = args.get(index).ok_or_else(|| missing(method, index))?;
    value.as_interop_handle().map_err(Error::from)
}

pub(crate) fn storage_context(
    args: &[StackValue],
    index: usize,
    method: &'static str,
) -> Result<StorageContextHandle> {
    let h = handle(args, index, method)?;
    h.as_storage_context().ok_or_else(|| {
        Error::Vm(VmError::HandleKindMismatch {
            expected: "StorageContext",
            found: h.kind_name(),
        })
    })
}

/// Interprets a byte slice as a nonnegative little-endian integer, the
/// shorthand `GetHeader`/`GetBlock` accept for a block height (spec.md
/// §4.5: "payload ≤ 5 bytes interpreted as a nonnegative integer").
pub(crate) fn bytes_as_height(bytes: &[u8]) -> Option<u32> {
    if bytes.len() > 5 {
        return None;
    }
    let mut buf = [0u8; 8];
    buf[..bytes.len()].copy_from_slice(bytes);
    let value = u64::from_le_bytes(buf);
    u32::try_from(value).ok()
}
