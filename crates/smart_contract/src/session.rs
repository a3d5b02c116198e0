//! `ServiceSession`: the per-execution context a single VM run is bound
//! to, per spec.md §4.7. Owns the snapshot exclusively for its lifetime,
//! accumulates notifications and the `ContractsCreated` table, and tracks
//! every disposable resource (storage-find iterators) so `Dispose` can
//! release them in registration order.

use crate::gas::GasMeter;
use crate::notification::{LogEntry, Notification, ObserverRegistry};
use crate::registry::InteropRegistry;
use crate::script_container::ScriptContainerRef;
use crate::snapshot::Snapshot;
use crate::storage::{StorageItem, StorageKey};
use crate::syscalls::register_builtin_handlers;
use crate::Result;
use neo_core::UInt160;
use neo_vm::{StackValue, TriggerType};
use std::collections::HashMap;
use std::rc::Rc;

/// A live `Storage.Find` cursor: the entries matching a prefix scan,
/// consumed one at a time by whichever opcode drives iterator advancement.
/// Out of scope for this crate (see spec.md §1) — the cursor only needs
/// to remember its remaining entries.
pub struct StorageIterator {
    entries: std::collections::VecDeque<(StorageKey, StorageItem)>,
}

impl StorageIterator {
    pub fn new(entries: Vec<(StorageKey, StorageItem)>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Advances the cursor, returning the next `(key, value)` pair.
    pub fn next(&mut self) -> Option<(StorageKey, StorageItem)> {
        self.entries.pop_front()
    }
}

/// One VM execution's bound context: trigger, snapshot, notification log,
/// contract-creation provenance, and disposable resources.
pub struct ServiceSession {
    trigger: TriggerType,
    snapshot: Box<dyn Snapshot>,
    registry: Rc<InteropRegistry>,
    gas: GasMeter,
    script_container: ScriptContainerRef,
    /// Innermost-last call stack of executing script hashes. The VM's CALL
    /// opcode mechanics live outside this crate (spec.md §1); a host
    /// driving this session pushes/pops frames as it enters and leaves a
    /// called contract.
    call_stack: Vec<UInt160>,
    notifications: Vec<Notification>,
    logs: Vec<LogEntry>,
    observers: ObserverRegistry,
    /// Maps a deployed contract to the script hash that created it in
    /// this session, per spec.md §4.3's `Contract.GetStorageContext` gate.
    contracts_created: HashMap<UInt160, UInt160>,
    iterators: HashMap<u32, StorageIterator>,
    next_iterator_id: u32,
    disposed: bool,
}

impl ServiceSession {
    pub fn new(
        trigger: TriggerType,
        snapshot: Box<dyn Snapshot>,
        script_container: ScriptContainerRef,
        entry_script_hash: UInt160,
        gas_limit: i64,
    ) -> Self {
        let mut registry = InteropRegistry::new();
        register_builtin_handlers(&mut registry);
        Self {
            trigger,
            snapshot,
            registry: Rc::new(registry),
            gas: GasMeter::new(gas_limit),
            script_container,
            call_stack: vec![entry_script_hash],
            notifications: Vec::new(),
            logs: Vec::new(),
            observers: ObserverRegistry::new(),
            contracts_created: HashMap::new(),
            iterators: HashMap::new(),
            next_iterator_id: 0,
            disposed: false,
        }
    }

    pub fn trigger(&self) -> TriggerType {
        self.trigger
    }

    pub fn snapshot(&self) -> &dyn Snapshot {
        self.snapshot.as_ref()
    }

    pub fn snapshot_mut(&mut self) -> &mut dyn Snapshot {
        self.snapshot.as_mut()
    }

    pub fn script_container(&self) -> &ScriptContainerRef {
        &self.script_container
    }

    pub fn gas(&self) -> &GasMeter {
        &self.gas
    }

    pub fn gas_mut(&mut self) -> &mut GasMeter {
        &mut self.gas
    }

    pub fn observers_mut(&mut self) -> &mut ObserverRegistry {
        &mut self.observers
    }

    /// The currently executing script, i.e. the innermost call-stack frame.
    pub fn current_script_hash(&self) -> UInt160 {
        *self
            .call_stack
            .last()
            .expect("call stack always has the entry frame")
    }

    /// The script that invoked the current one, or the current script
    /// itself at the entry frame (mirrors the teacher's
    /// `calling_script_hash.unwrap_or(current)` convention).
    pub fn calling_script_hash(&self) -> UInt160 {
        if self.call_stack.len() >= 2 {
            self.call_stack[self.call_stack.len() - 2]
        } else {
            self.current_script_hash()
        }
    }

    pub fn entry_script_hash(&self) -> UInt160 {
        *self
            .call_stack
            .first()
            .expect("call stack always has the entry frame")
    }

    /// Pushes a new call-stack frame as the VM enters a called contract.
    pub fn enter_script(&mut self, hash: UInt160) {
        self.call_stack.push(hash);
    }

    /// Pops the innermost call-stack frame as the VM returns from a
    /// called contract.
    pub fn exit_script(&mut self) {
        if self.call_stack.len() > 1 {
            self.call_stack.pop();
        }
    }

    /// Records that `creator` deployed `contract` in this session, the
    /// provenance `Contract.GetStorageContext` consults.
    pub fn record_contract_created(&mut self, contract: UInt160, creator: UInt160) {
        self.contracts_created.insert(contract, creator);
    }

    pub fn is_contract_creator(&self, contract: &UInt160, caller: &UInt160) -> bool {
        self.contracts_created.get(contract) == Some(caller)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn push_notification(&mut self, notification: Notification) {
        self.observers.fire_notify(&notification);
        self.notifications.push(notification);
    }

    pub fn push_log(&mut self, entry: LogEntry) {
        self.observers.fire_log(&entry);
        self.logs.push(entry);
    }

    /// Registers a fresh `Storage.Find` cursor and returns the id its
    /// `InteropHandle::Iterator` carries.
    pub fn register_iterator(&mut self, iterator: StorageIterator) -> u32 {
        let id = self.next_iterator_id;
        self.next_iterator_id += 1;
        self.iterators.insert(id, iterator);
        id
    }

    pub fn iterator_mut(&mut self, id: u32) -> Option<&mut StorageIterator> {
        self.iterators.get_mut(&id)
    }

    /// Looks up and invokes the method `descriptor` identifies, charging
    /// gas per spec.md §4.8 before running the handler.
    pub fn invoke(&mut self, descriptor: &[u8], args: &[StackValue]) -> Result<Vec<StackValue>> {
        let registry = self.registry.clone();
        registry.invoke(descriptor, self, args)
    }

    /// Flushes the snapshot to durable storage. Call only once execution
    /// completes without a VM fault, per spec.md §5.
    pub fn commit(&mut self) {
        self.snapshot.commit();
    }

    /// Releases every disposable resource in registration order.
    /// Idempotent: a second call is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.iterators.clear();
        self.disposed = true;
    }
}

impl Drop for ServiceSession {
    fn drop(&mut self) {
        self.dispose();
    }
}
