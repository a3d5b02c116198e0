//! The syscall catalogue: every `InteropHandler` this crate registers by
//! default, grouped by the component of spec.md §4 it implements.

pub(crate) mod accessors;
pub(crate) mod args;
pub(crate) mod blockchain;
pub(crate) mod contract;
pub(crate) mod execution_engine;
pub(crate) mod runtime;
pub(crate) mod storage;

use crate::registry::InteropRegistry;

/// Registers every built-in handler under its spec-mandated name. Called
/// once per `ServiceSession`; cheap enough that sharing a registry across
/// sessions is an optimization this crate doesn't bother with (see
/// DESIGN.md).
pub(crate) fn register_builtin_handlers(registry: &mut InteropRegistry) {
    registry.register(Box::new(execution_engine::GetScriptContainer));
    registry.register(Box::new(execution_engine::GetExecutingScriptHash));
    registry.register(Box::new(execution_engine::GetCallingScriptHash));
    registry.register(Box::new(execution_engine::GetEntryScriptHash));

    registry.register(Box::new(runtime::Platform));
    registry.register(Box::new(runtime::GetTrigger));
    registry.register(Box::new(runtime::CheckWitness));
    registry.register(Box::new(runtime::Notify));
    registry.register(Box::new(runtime::Log));
    registry.register(Box::new(runtime::GetTime));
    registry.register(Box::new(runtime::Serialize));
    registry.register(Box::new(runtime::Deserialize));

    registry.register(Box::new(blockchain::GetHeight));
    registry.register(Box::new(blockchain::GetHeader));
    registry.register(Box::new(blockchain::GetBlock));
    registry.register(Box::new(blockchain::GetTransaction));
    registry.register(Box::new(blockchain::GetTransactionHeight));
    registry.register(Box::new(blockchain::GetContract));

    registry.register(Box::new(accessors::HeaderGetIndex));
    registry.register(Box::new(accessors::HeaderGetHash));
    registry.register(Box::new(accessors::HeaderGetPrevHash));
    registry.register(Box::new(accessors::HeaderGetTimestamp));
    registry.register(Box::new(accessors::BlockGetTransactionCount));
    registry.register(Box::new(accessors::BlockGetTransactions));
    registry.register(Box::new(accessors::BlockGetTransaction));
    registry.register(Box::new(accessors::TransactionGetHash));

    registry.register(Box::new(contract::Destroy));
    registry.register(Box::new(contract::GetStorageContext));

    registry.register(Box::new(storage::GetContext));
    registry.register(Box::new(storage::GetReadOnlyContext));
    registry.register(Box::new(storage::AsReadOnly));
    registry.register(Box::new(storage::Get));
    registry.register(Box::new(storage::Put));
    registry.register(Box::new(storage::PutEx));
    registry.register(Box::new(storage::Delete));
    registry.register(Box::new(storage::Find));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::method_id;
    use crate::script_container::ScriptContainerRef;
    use crate::session::ServiceSession;
    use crate::snapshot::MemorySnapshot;
    use neo_core::{Transaction, UInt160};
    use neo_vm::{StackValue, TriggerType};
    use std::rc::Rc;

    fn session() -> ServiceSession {
        ServiceSession::new(
            TriggerType::Application,
            Box::new(MemorySnapshot::new()),
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
            UInt160::zero(),
            100_000,
        )
    }

    #[test]
    fn every_table_name_resolves_to_a_registered_handler() {
        let names = [
            "System.ExecutionEngine.GetScriptContainer",
            "System.ExecutionEngine.GetExecutingScriptHash",
            "System.ExecutionEngine.GetCallingScriptHash",
            "System.ExecutionEngine.GetEntryScriptHash",
            "System.Runtime.Platform",
            "System.Runtime.GetTrigger",
            "System.Runtime.CheckWitness",
            "System.Runtime.Notify",
            "System.Runtime.Log",
            "System.Runtime.GetTime",
            "System.Runtime.Serialize",
            "System.Runtime.Deserialize",
            "System.Blockchain.GetHeight",
            "System.Blockchain.GetHeader",
            "System.Blockchain.GetBlock",
            "System.Blockchain.GetTransaction",
            "System.Blockchain.GetTransactionHeight",
            "System.Blockchain.GetContract",
            "System.Header.GetIndex",
            "System.Header.GetHash",
            "System.Header.GetPrevHash",
            "System.Header.GetTimestamp",
            "System.Block.GetTransactionCount",
            "System.Block.GetTransactions",
            "System.Block.GetTransaction",
            "System.Transaction.GetHash",
            "System.Contract.Destroy",
            "System.Contract.GetStorageContext",
            "System.Storage.GetContext",
            "System.Storage.GetReadOnlyContext",
            "System.StorageContext.AsReadOnly",
            "System.Storage.Get",
            "System.Storage.Put",
            "System.Storage.PutEx",
            "System.Storage.Delete",
            "System.Storage.Find",
        ];
        let mut seen_ids = std::collections::HashSet::new();
        for name in names {
            assert!(seen_ids.insert(method_id(name)), "duplicate id for {name}");
        }
    }

    #[test]
    fn platform_is_reachable_through_the_full_dispatch_path() {
        let mut session = session();
        let result = session
            .invoke("System.Runtime.Platform".as_bytes(), &[])
            .unwrap();
        assert_eq!(result, vec![StackValue::byte_array(b"NEO".to_vec())]);
    }

    #[test]
    fn unknown_method_name_is_rejected() {
        let mut session = session();
        assert!(session.invoke(b"System.DoesNotExist", &[]).is_err());
    }
}
