//! The enclosing object whose signatures authorize a session's execution:
//! a transaction, or a block header while that block is being persisted
//! (spec.md §3's "script container", supplemented in SPEC_FULL.md §3).
//!
//! `neo_core::ScriptContainer` already abstracts over the two concrete
//! kinds for witness-checking purposes; this wrapper additionally knows
//! how to present itself as the `InteropHandle`
//! `System.ExecutionEngine.GetScriptContainer` pushes, which `neo_core`
//! cannot express without depending on `neo_vm`.

use neo_core::{BlockHeader, ScriptContainer, Transaction, UInt160, UInt256};
use neo_vm::InteropHandle;
use std::rc::Rc;

#[derive(Clone)]
pub enum ScriptContainerRef {
    Transaction(Rc<Transaction>),
    Block(Rc<BlockHeader>),
}

impl ScriptContainerRef {
    pub fn required_signers(&self) -> Vec<UInt160> {
        match self {
            Self::Transaction(t) => t.required_signers(),
            Self::Block(h) => h.required_signers(),
        }
    }

    pub fn hash(&self) -> UInt256 {
        match self {
            Self::Transaction(t) => t.container_hash(),
            Self::Block(h) => h.container_hash(),
        }
    }

    pub fn as_interop_handle(&self) -> InteropHandle {
        match self {
            Self::Transaction(t) => InteropHandle::Transaction(t.clone()),
            Self::Block(h) => InteropHandle::Header(h.clone()),
        }
    }
}
