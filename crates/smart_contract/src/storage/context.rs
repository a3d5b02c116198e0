//! Validation shared by every storage-mutating syscall: the gate spec.md
//! §4.3 describes as required for `Put`/`PutEx`/`Delete`.

use crate::contract_state::ContractState;
use crate::session::ServiceSession;
use crate::{Error, Result};
use neo_config::MAX_STORAGE_KEY_SIZE;
use neo_vm::StorageContextHandle;

/// Checks every precondition a mutating storage call shares, returning the
/// target contract's state once all of them pass. Read-only calls (`Get`)
/// skip this and only need the key-length check, since they are accepted
/// from a read-only context.
pub fn require_mutable(
    session: &ServiceSession,
    context: &StorageContextHandle,
    key: &[u8],
) -> Result<ContractState> {
    if !session.trigger().allows_state_mutation() {
        return Err(Error::WrongTrigger {
            method: "System.Storage.Put/PutEx/Delete",
            expected: "Application (or OnPersist/PostPersist)",
            actual: session.trigger(),
        });
    }
    if key.len() > MAX_STORAGE_KEY_SIZE {
        return Err(Error::StorageKeyTooLarge {
            len: key.len(),
            limit: MAX_STORAGE_KEY_SIZE,
        });
    }
    if context.read_only {
        return Err(Error::StorageWriteRejected {
            reason: "context is read-only",
        });
    }
    let contract = session
        .snapshot()
        .get_contract(&context.script_hash)
        .ok_or(Error::UnknownContract(context.script_hash))?;
    if !contract.manifest.has_storage {
        return Err(Error::StorageWriteRejected {
            reason: "contract has no storage partition",
        });
    }
    Ok(contract)
}

/// The key-length check `Get` still enforces even though it tolerates a
/// read-only context.
pub fn check_key_size(key: &[u8]) -> Result<()> {
    if key.len() > MAX_STORAGE_KEY_SIZE {
        return Err(Error::StorageKeyTooLarge {
            len: key.len(),
            limit: MAX_STORAGE_KEY_SIZE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract_state::ContractManifest;
    use crate::snapshot::MemorySnapshot;
    use neo_core::{Transaction, UInt160};
    use neo_vm::TriggerType;
    use std::rc::Rc;

    fn session_with(contract_hash: UInt160, has_storage: bool, trigger: TriggerType) -> ServiceSession {
        use crate::script_container::ScriptContainerRef;
        let mut snapshot = MemorySnapshot::new();
        snapshot.put_contract(ContractState::new(
            1,
            contract_hash,
            vec![0x51],
            ContractManifest {
                name: "T".into(),
                has_storage,
            },
        ));
        ServiceSession::new(
            trigger,
            Box::new(snapshot),
            ScriptContainerRef::Transaction(Rc::new(Transaction::new(
                0,
                0,
                0,
                0,
                0,
                vec![],
                vec![],
                vec![],
                vec![],
            ))),
            contract_hash,
            i64::MAX,
        )
    }

    #[test]
    fn rejects_read_only_context() {
        let hash = UInt160::from_bytes(&[1u8; 20]).unwrap();
        let session = session_with(hash, true, TriggerType::Application);
        let ctx = StorageContextHandle::new(hash).as_read_only();
        assert!(require_mutable(&session, &ctx, b"k").is_err());
    }

    #[test]
    fn rejects_non_application_trigger() {
        let hash = UInt160::from_bytes(&[1u8; 20]).unwrap();
        let session = session_with(hash, true, TriggerType::Verification);
        let ctx = StorageContextHandle::new(hash);
        assert!(require_mutable(&session, &ctx, b"k").is_err());
    }

    #[test]
    fn rejects_storage_less_contract() {
        let hash = UInt160::from_bytes(&[1u8; 20]).unwrap();
        let session = session_with(hash, false, TriggerType::Application);
        let ctx = StorageContextHandle::new(hash);
        assert!(require_mutable(&session, &ctx, b"k").is_err());
    }

    #[test]
    fn accepts_a_writable_context_on_a_storage_contract() {
        let hash = UInt160::from_bytes(&[1u8; 20]).unwrap();
        let session = session_with(hash, true, TriggerType::Application);
        let ctx = StorageContextHandle::new(hash);
        assert!(require_mutable(&session, &ctx, b"k").is_ok());
    }
}
