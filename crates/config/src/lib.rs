//! Shared constants for the Neo smart-contract interop layer.
//!
//! These mirror the subset of `neo_config`/`neo_core::constants` the
//! interop surface actually depends on: block timing (used by
//! `Runtime.GetTime`'s fallback), and the size ceilings that gate the
//! stack-value codec and contract storage.

/// Target time between blocks, in seconds. Used by `Runtime.GetTime`'s
/// no-persisting-block fallback: `header.timestamp + SECONDS_PER_BLOCK`.
pub const SECONDS_PER_BLOCK: u64 = 15;

/// Size of a script hash (UInt160) in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// Size of a ledger hash (UInt256) in bytes.
pub const HASH_SIZE: usize = 32;

/// Maximum serialized size of a single stack value (`MAX_ITEM_SIZE`).
pub const MAX_ITEM_SIZE: usize = 1_048_576; // 1 MiB

/// Maximum element count a single container header may declare during
/// deserialization (`MAX_ARRAY_SIZE`).
pub const MAX_ARRAY_SIZE: usize = 1_048_576;

/// Maximum length of a storage key, in bytes. Spec-mandated; differs from
/// the historical C# `ApplicationEngine.MaxStorageKeySize` of 64 bytes.
pub const MAX_STORAGE_KEY_SIZE: usize = 1024;

/// Maximum length of a storage value, in bytes.
pub const MAX_STORAGE_VALUE_SIZE: usize = u16::MAX as usize;
