//! The smart-contract interoperability layer: the bridge between a
//! stack-based VM executing contract bytecode and the node's persistent
//! ledger state.
//!
//! Covers syscall dispatch and metering ([`registry`], [`syscalls`]), the
//! per-execution [`session`] those syscalls run against, the contract
//! [`storage`] namespace and its isolation rules, and the [`snapshot`]
//! façade over ledger state. The VM's opcode interpreter and evaluation
//! stack mechanics are out of scope — see `neo-vm` for the value model
//! this crate exchanges values through.

mod contract_state;
mod error;
mod gas;
mod notification;
mod registry;
mod script_container;
mod session;
mod snapshot;
mod storage;
mod syscalls;

pub use contract_state::{ContractManifest, ContractState};
pub use error::{Error, Result};
pub use gas::GasMeter;
pub use notification::{LogEntry, Notification, Observer, ObserverRegistry};
pub use registry::{method_id, InteropHandler, InteropRegistry};
pub use script_container::ScriptContainerRef;
pub use session::{ServiceSession, StorageIterator};
pub use snapshot::{BlockLocator, MemorySnapshot, Snapshot};
pub use storage::{StorageItem, StorageKey};
