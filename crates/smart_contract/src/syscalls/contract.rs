//! Contract lifecycle and storage-context minting: `System.Contract.*`
//! — spec.md §4.3, §4.6.

use crate::registry::InteropHandler;
use crate::session::ServiceSession;
use crate::syscalls::args;
use crate::{Error, Result};
use neo_vm::{InteropHandle, StackValue, StorageContextHandle};

/// A contract may only destroy itself, and only while its own script is
/// executing under `Application` — an `OnPersist`/`PostPersist` run never
/// carries a user script on the call stack to destroy.
pub struct Destroy;

impl InteropHandler for Destroy {
    fn name(&self) -> &'static str {
        "System.Contract.Destroy"
    }

    fn price(&self) -> Option<i64> {
        Some(1)
    }

    fn invoke(&self, session: &mut ServiceSession, _args: &[StackValue]) -> Result<Vec<StackValue>> {
        use neo_vm::TriggerType;
        if session.trigger() != TriggerType::Application {
            return Err(Error::WrongTrigger {
                method: self.name(),
                expected: "Application",
                actual: session.trigger(),
            });
        }
        let target = session.current_script_hash();
        session
            .snapshot()
            .get_contract(&target)
            .ok_or(Error::UnknownContract(target))?;
        log::info!("destroying contract {target}");
        session.snapshot_mut().remove_contract(&target);
        session.snapshot_mut().purge_storage(&target);
        Ok(vec![])
    }
}

/// Grants a writable `StorageContext` over a target contract's partition,
/// but only to the script on record as having created it this session —
/// spec.md §4.3's creator gate. `GetContract` must already have resolved
/// the target hash into the `InteropHandle::Contract` this pops.
pub struct GetStorageContext;

impl InteropHandler for GetStorageContext {
    fn name(&self) -> &'static str {
        "System.Contract.GetStorageContext"
    }

    fn price(&self) -> Option<i64> {
        Some(1)
    }

    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let handle = args::handle(args, 0, self.name())?;
        let target = handle.as_contract().ok_or_else(|| Error::Vm(neo_vm::VmError::HandleKindMismatch {
            expected: "Contract",
            found: handle.kind_name(),
        }))?;
        let caller = session.current_script_hash();
        if !session.is_contract_creator(&target, &caller) {
            return Err(Error::NotContractCreator {
                caller,
                target,
            });
        }
        Ok(vec![StackValue::interop_handle(InteropHandle::StorageContext(
            StorageContextHandle::new(target),
        ))])
    }
}
