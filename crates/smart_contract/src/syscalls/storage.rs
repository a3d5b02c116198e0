//! The storage namespace syscalls: `System.Storage.*` and
//! `System.StorageContext.*` — spec.md §4.3.

use crate::registry::InteropHandler;
use crate::session::{ServiceSession, StorageIterator};
use crate::storage::{context, StorageItem, StorageKey};
use crate::syscalls::args;
use crate::{Error, Result};
use neo_config::MAX_STORAGE_KEY_SIZE;
use neo_vm::{InteropHandle, StackValue};

/// Gas charged per byte of value written, the dynamic cost `Storage.Put`
/// and `Storage.PutEx` compute themselves rather than carry a static
/// price (spec.md §4.8's "non-registered price ... dynamic calculation
/// performed outside the handler" — here performed inside, since this
/// crate doesn't model a separate execution-engine budget layer).
const STORAGE_PRICE_PER_BYTE: i64 = 100;

/// Bit 0 of `Storage.PutEx`'s flags argument: latch the entry constant.
const CONSTANT_FLAG: u8 = 0b01;

pub struct GetContext;
impl InteropHandler for GetContext {
    fn name(&self) -> &'static str {
        "System.Storage.GetContext"
    }
    fn price(&self) -> Option<i64> {
        Some(1)
    }
    fn invoke(&self, session: &mut ServiceSession, _args: &[StackValue]) -> Result<Vec<StackValue>> {
        let hash = session.current_script_hash();
        Ok(vec![StackValue::interop_handle(InteropHandle::StorageContext(
            neo_vm::StorageContextHandle::new(hash),
        ))])
    }
}

pub struct GetReadOnlyContext;
impl InteropHandler for GetReadOnlyContext {
    fn name(&self) -> &'static str {
        "System.Storage.GetReadOnlyContext"
    }
    fn price(&self) -> Option<i64> {
        Some(1)
    }
    fn invoke(&self, session: &mut ServiceSession, _args: &[StackValue]) -> Result<Vec<StackValue>> {
        let hash = session.current_script_hash();
        Ok(vec![StackValue::interop_handle(InteropHandle::StorageContext(
            neo_vm::StorageContextHandle::new(hash).as_read_only(),
        ))])
    }
}

pub struct AsReadOnly;
impl InteropHandler for AsReadOnly {
    fn name(&self) -> &'static str {
        "System.StorageContext.AsReadOnly"
    }
    fn price(&self) -> Option<i64> {
        Some(1)
    }
    fn invoke(&self, _session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let context = args::storage_context(args, 0, self.name())?;
        Ok(vec![StackValue::interop_handle(InteropHandle::StorageContext(
            context.as_read_only(),
        ))])
    }
}

pub struct Get;
impl InteropHandler for Get {
    fn name(&self) -> &'static str {
        "System.Storage.Get"
    }
    fn price(&self) -> Option<i64> {
        Some(100)
    }
    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let ctx = args::storage_context(args, 0, self.name())?;
        let key = args::bytes(args, 1, self.name())?;
        context::check_key_size(key)?;
        let item = session
            .snapshot()
            .get_storage(&StorageKey::new(ctx.script_hash, key.to_vec()));
        let value = item.map(|i| i.value_bytes).unwrap_or_default();
        Ok(vec![StackValue::byte_array(value)])
    }
}

pub struct Put;
impl InteropHandler for Put {
    fn name(&self) -> &'static str {
        "System.Storage.Put"
    }
    /// Dynamic cost: charged inside `invoke` rather than by the registry.
    fn price(&self) -> Option<i64> {
        None
    }
    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        put(session, args, self.name(), false)
    }
}

pub struct PutEx;
impl InteropHandler for PutEx {
    fn name(&self) -> &'static str {
        "System.Storage.PutEx"
    }
    fn price(&self) -> Option<i64> {
        None
    }
    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        put(session, args, self.name(), true)
    }
}

fn put(
    session: &mut ServiceSession,
    args: &[StackValue],
    method: &'static str,
    allow_flags: bool,
) -> Result<Vec<StackValue>> {
    let ctx = args::storage_context(args, 0, method)?;
    let key = args::bytes(args, 1, method)?.to_vec();
    let value = args::bytes(args, 2, method)?.to_vec();
    let constant = if allow_flags {
        use num_traits::ToPrimitive;
        let flags = args::integer(args, 3, method)?.to_u8().unwrap_or(0);
        flags & CONSTANT_FLAG != 0
    } else {
        false
    };

    context::require_mutable(session, &ctx, &key)?;

    let storage_key = StorageKey::new(ctx.script_hash, key.clone());
    if let Some(existing) = session.snapshot().get_storage(&storage_key) {
        if existing.is_constant {
            return Err(Error::StorageWriteRejected {
                reason: "entry is constant",
            });
        }
    }

    let price = STORAGE_PRICE_PER_BYTE * value.len().max(1) as i64;
    session.gas_mut().consume(price)?;

    let item = if constant {
        StorageItem::new(value, false).as_constant()
    } else {
        StorageItem::new(value, false)
    };
    session.snapshot_mut().put_storage(storage_key, item);
    Ok(vec![])
}

pub struct Delete;
impl InteropHandler for Delete {
    fn name(&self) -> &'static str {
        "System.Storage.Delete"
    }
    fn price(&self) -> Option<i64> {
        Some(100)
    }
    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let ctx = args::storage_context(args, 0, self.name())?;
        let key = args::bytes(args, 1, self.name())?.to_vec();
        context::require_mutable(session, &ctx, &key)?;
        let storage_key = StorageKey::new(ctx.script_hash, key);
        if let Some(existing) = session.snapshot().get_storage(&storage_key) {
            if existing.is_constant {
                return Err(Error::StorageWriteRejected {
                    reason: "entry is constant",
                });
            }
        }
        session.snapshot_mut().delete_storage(&storage_key);
        Ok(vec![])
    }
}

/// Not in spec.md's table (supplemented per SPEC_FULL.md): a prefix scan
/// over one contract's partition, returning a disposable iterator handle
/// whose entries the session's `StorageIterator` table tracks.
pub struct Find;
impl InteropHandler for Find {
    fn name(&self) -> &'static str {
        "System.Storage.Find"
    }
    fn price(&self) -> Option<i64> {
        Some(100)
    }
    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let ctx = args::storage_context(args, 0, self.name())?;
        let prefix = args::bytes(args, 1, self.name())?;
        if prefix.len() > MAX_STORAGE_KEY_SIZE {
            return Err(Error::StorageKeyTooLarge {
                len: prefix.len(),
                limit: MAX_STORAGE_KEY_SIZE,
            });
        }
        let entries = session.snapshot().find_storage(&ctx.script_hash, prefix);
        let id = session.register_iterator(StorageIterator::new(entries));
        Ok(vec![StackValue::interop_handle(InteropHandle::Iterator(id))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract_state::{ContractManifest, ContractState};
    use crate::script_container::ScriptContainerRef;
    use crate::snapshot::MemorySnapshot;
    use neo_core::{Transaction, UInt160};
    use neo_vm::{StorageContextHandle, TriggerType};
    use std::rc::Rc;

    fn session(hash: UInt160) -> ServiceSession {
        let mut snapshot = MemorySnapshot::new();
        snapshot.put_contract(ContractState::new(
            1,
            hash,
            vec![0x51],
            ContractManifest {
                name: "T".into(),
                has_storage: true,
            },
        ));
        ServiceSession::new(
            TriggerType::Application,
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
            hash,
            1_000_000,
        )
    }

    #[test]
    fn put_then_get_round_trips() {
        let hash = UInt160::from_bytes(&[1u8; 20]).unwrap();
        let mut s = session(hash);
        let ctx = StackValue::interop_handle(InteropHandle::StorageContext(StorageContextHandle::new(hash)));
        Put.invoke(&mut s, &[ctx.clone(), StackValue::from("k"), StackValue::from("v")])
            .unwrap();
        let result = Get.invoke(&mut s, &[ctx, StackValue::from("k")]).unwrap();
        assert_eq!(result, vec![StackValue::byte_array(b"v".to_vec())]);
    }

    #[test]
    fn put_ex_constant_then_put_fails_but_value_survives() {
        let hash = UInt160::from_bytes(&[1u8; 20]).unwrap();
        let mut s = session(hash);
        let ctx = StackValue::interop_handle(InteropHandle::StorageContext(StorageContextHandle::new(hash)));
        PutEx
            .invoke(
                &mut s,
                &[
                    ctx.clone(),
                    StackValue::from("k"),
                    StackValue::from("v"),
                    StackValue::integer(1i64),
                ],
            )
            .unwrap();
        assert!(Put
            .invoke(&mut s, &[ctx.clone(), StackValue::from("k"), StackValue::from("v2")])
            .is_err());
        let result = Get.invoke(&mut s, &[ctx, StackValue::from("k")]).unwrap();
        assert_eq!(result, vec![StackValue::byte_array(b"v".to_vec())]);
    }

    #[test]
    fn delete_then_get_returns_empty() {
        let hash = UInt160::from_bytes(&[1u8; 20]).unwrap();
        let mut s = session(hash);
        let ctx = StackValue::interop_handle(InteropHandle::StorageContext(StorageContextHandle::new(hash)));
        Put.invoke(&mut s, &[ctx.clone(), StackValue::from("k"), StackValue::from("v")])
            .unwrap();
        Delete.invoke(&mut s, &[ctx.clone(), StackValue::from("k")]).unwrap();
        let result = Get.invoke(&mut s, &[ctx, StackValue::from("k")]).unwrap();
        assert_eq!(result, vec![StackValue::byte_array(Vec::<u8>::new())]);
    }

    #[test]
    fn put_through_a_read_only_context_fails() {
        let hash = UInt160::from_bytes(&[1u8; 20]).unwrap();
        let mut s = session(hash);
        let ctx = StackValue::interop_handle(InteropHandle::StorageContext(
            StorageContextHandle::new(hash).as_read_only(),
        ));
        assert!(Put
            .invoke(&mut s, &[ctx, StackValue::from("k"), StackValue::from("v")])
            .is_err());
    }

    #[test]
    fn put_with_key_at_the_boundary_succeeds_one_past_fails() {
        let hash = UInt160::from_bytes(&[1u8; 20]).unwrap();
        let mut s = session(hash);
        let ctx = StackValue::interop_handle(InteropHandle::StorageContext(StorageContextHandle::new(hash)));
        let key_ok = vec![0x41; MAX_STORAGE_KEY_SIZE];
        let key_bad = vec![0x41; MAX_STORAGE_KEY_SIZE + 1];
        assert!(Put
            .invoke(
                &mut s,
                &[ctx.clone(), StackValue::byte_array(key_ok), StackValue::from("v")]
            )
            .is_ok());
        assert!(Put
            .invoke(&mut s, &[ctx, StackValue::byte_array(key_bad), StackValue::from("v")])
            .is_err());
    }

    #[test]
    fn find_scopes_results_to_the_context_and_prefix() {
        let hash = UInt160::from_bytes(&[1u8; 20]).unwrap();
        let mut s = session(hash);
        let ctx = StackValue::interop_handle(InteropHandle::StorageContext(StorageContextHandle::new(hash)));
        Put.invoke(
            &mut s,
            &[ctx.clone(), StackValue::from("prefix:1"), StackValue::from("a")],
        )
        .unwrap();
        Put.invoke(&mut s, &[ctx.clone(), StackValue::from("other"), StackValue::from("b")])
            .unwrap();
        let result = Find.invoke(&mut s, &[ctx, StackValue::from("prefix:")]).unwrap();
        match &result[0] {
            StackValue::InteropHandle(InteropHandle::Iterator(id)) => {
                let iterator = s.iterator_mut(*id).unwrap();
                let (key, item) = iterator.next().unwrap();
                assert_eq!(key.key_bytes, b"prefix:1");
                assert_eq!(item.value_bytes, b"a");
                assert!(iterator.next().is_none());
            }
            other => panic!("expected an iterator handle, got {other:?}"),
        }
    }
}
