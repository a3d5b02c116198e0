//! Typed references to host objects a `StackValue::InteropHandle` may
//! carry: headers, blocks, transactions, contracts, and storage contexts.
//!
//! A closed enum is used in place of the open trait-object dispatch a
//! generic interop-interface abstraction would invite, so a handler that
//! receives the wrong kind gets an explicit, matchable mismatch instead of
//! a failed downcast.

use neo_core::{Block, BlockHeader, Transaction, UInt160};
use std::rc::Rc;

/// A capability handle granting read or read/write access to one
/// contract's storage partition (spec.md's `StorageContext`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageContextHandle {
    pub script_hash: UInt160,
    pub read_only: bool,
}

impl StorageContextHandle {
    pub fn new(script_hash: UInt160) -> Self {
        Self {
            script_hash,
            read_only: false,
        }
    }

    /// A new context over the same partition with `read_only` latched true.
    pub fn as_read_only(&self) -> Self {
        Self {
            script_hash: self.script_hash,
            read_only: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteropHandle {
    Header(Rc<BlockHeader>),
    Block(Rc<Block>),
    Transaction(Rc<Transaction>),
    Contract(UInt160),
    StorageContext(StorageContextHandle),
    /// A live `Storage.Find` cursor. The id indexes into the owning
    /// session's disposable iterator table; the iterator's actual state
    /// lives there, not in the VM layer.
    Iterator(u32),
}

impl InteropHandle {
    pub fn kind_name(&self) -> &'static str {
        match self {
            InteropHandle::Header(_) => "Header",
            InteropHandle::Block(_) => "Block",
            InteropHandle::Transaction(_) => "Transaction",
            InteropHandle::Contract(_) => "Contract",
            InteropHandle::StorageContext(_) => "StorageContext",
            InteropHandle::Iterator(_) => "Iterator",
        }
    }

    pub fn as_header(&self) -> Option<&Rc<BlockHeader>> {
        match self {
            InteropHandle::Header(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&Rc<Block>> {
        match self {
            InteropHandle::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_transaction(&self) -> Option<&Rc<Transaction>> {
        match self {
            InteropHandle::Transaction(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_contract(&self) -> Option<UInt160> {
        match self {
            InteropHandle::Contract(hash) => Some(*hash),
            _ => None,
        }
    }

    pub fn as_storage_context(&self) -> Option<StorageContextHandle> {
        match self {
            InteropHandle::StorageContext(ctx) => Some(*ctx),
            _ => None,
        }
    }

    pub fn as_iterator(&self) -> Option<u32> {
        match self {
            InteropHandle::Iterator(id) => Some(*id),
            _ => None,
        }
    }
}
