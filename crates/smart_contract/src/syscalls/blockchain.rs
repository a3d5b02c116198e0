//! Ledger-wide queries: `System.Blockchain.*` — spec.md §4.5.

use crate::registry::InteropHandler;
use crate::session::ServiceSession;
use crate::snapshot::BlockLocator;
use crate::syscalls::args;
use crate::{Error, Result};
use neo_core::{UInt160, UInt256};
use neo_vm::{InteropHandle, StackValue};

/// Resolves the `GetHeader`/`GetBlock`/`GetContract` shorthand: a 32-byte
/// argument is a hash, anything shorter is read as a little-endian height.
fn locator(bytes: &[u8], method: &'static str) -> Result<BlockLocator> {
    if bytes.len() == 32 {
        let hash = UInt256::from_bytes(bytes).map_err(|e| Error::InvalidArguments {
            method,
            reason: e.to_string(),
        })?;
        return Ok(BlockLocator::Hash(hash));
    }
    args::bytes_as_height(bytes)
        .map(BlockLocator::Height)
        .ok_or_else(|| Error::InvalidArguments {
            method,
            reason: "expected a 32-byte hash or a height of at most 5 bytes".to_string(),
        })
}

pub struct GetHeight;

impl InteropHandler for GetHeight {
    fn name(&self) -> &'static str {
        "System.Blockchain.GetHeight"
    }

    fn price(&self) -> Option<i64> {
        Some(1)
    }

    fn invoke(&self, session: &mut ServiceSession, _args: &[StackValue]) -> Result<Vec<StackValue>> {
        Ok(vec![StackValue::integer(session.snapshot().height() as i64)])
    }
}

pub struct GetHeader;

impl InteropHandler for GetHeader {
    fn name(&self) -> &'static str {
        "System.Blockchain.GetHeader"
    }

    fn price(&self) -> Option<i64> {
        Some(100)
    }

    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let bytes = args::bytes(args, 0, self.name())?;
        let where_ = locator(bytes, self.name())?;
        match session.snapshot().get_header(where_) {
            Some(header) => Ok(vec![StackValue::interop_handle(InteropHandle::Header(header))]),
            None => Ok(vec![StackValue::byte_array(Vec::new())]),
        }
    }
}

pub struct GetBlock;

impl InteropHandler for GetBlock {
    fn name(&self) -> &'static str {
        "System.Blockchain.GetBlock"
    }

    fn price(&self) -> Option<i64> {
        Some(200)
    }

    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let bytes = args::bytes(args, 0, self.name())?;
        let where_ = locator(bytes, self.name())?;
        match session.snapshot().get_block(where_) {
            Some(block) => Ok(vec![StackValue::interop_handle(InteropHandle::Block(block))]),
            None => Ok(vec![StackValue::byte_array(Vec::new())]),
        }
    }
}

pub struct GetTransaction;

impl InteropHandler for GetTransaction {
    fn name(&self) -> &'static str {
        "System.Blockchain.GetTransaction"
    }

    fn price(&self) -> Option<i64> {
        Some(200)
    }

    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let bytes = args::bytes(args, 0, self.name())?;
        let hash = UInt256::from_bytes(bytes).map_err(|e| Error::InvalidArguments {
            method: self.name(),
            reason: e.to_string(),
        })?;
        match session.snapshot().get_transaction(&hash) {
            Some(tx) => Ok(vec![StackValue::interop_handle(InteropHandle::Transaction(tx))]),
            None => Ok(vec![StackValue::byte_array(Vec::new())]),
        }
    }
}

pub struct GetTransactionHeight;

impl InteropHandler for GetTransactionHeight {
    fn name(&self) -> &'static str {
        "System.Blockchain.GetTransactionHeight"
    }

    fn price(&self) -> Option<i64> {
        Some(100)
    }

    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let bytes = args::bytes(args, 0, self.name())?;
        let hash = UInt256::from_bytes(bytes).map_err(|e| Error::InvalidArguments {
            method: self.name(),
            reason: e.to_string(),
        })?;
        let height = session
            .snapshot()
            .get_transaction_height(&hash)
            .map(|h| h as i64)
            .unwrap_or(-1);
        Ok(vec![StackValue::integer(height)])
    }
}

pub struct GetContract;

impl InteropHandler for GetContract {
    fn name(&self) -> &'static str {
        "System.Blockchain.GetContract"
    }

    fn price(&self) -> Option<i64> {
        Some(100)
    }

    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let bytes = args::bytes(args, 0, self.name())?;
        let hash = UInt160::from_bytes(bytes).map_err(|e| Error::InvalidArguments {
            method: self.name(),
            reason: e.to_string(),
        })?;
        match session.snapshot().get_contract(&hash) {
            Some(_) => Ok(vec![StackValue::interop_handle(InteropHandle::Contract(hash))]),
            None => Ok(vec![StackValue::byte_array(Vec::new())]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract_state::{ContractManifest, ContractState};
    use crate::script_container::ScriptContainerRef;
    use crate::snapshot::MemorySnapshot;
    use neo_core::Transaction;
    use neo_vm::TriggerType;
    use std::rc::Rc;

    fn session_with(snapshot: MemorySnapshot) -> ServiceSession {
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
            UInt160::zero(),
            100_000,
        )
    }

    #[test]
    fn get_height_reports_the_snapshot_height() {
        let mut snapshot = MemorySnapshot::new();
        snapshot.set_height(42);
        let mut session = session_with(snapshot);
        let result = GetHeight.invoke(&mut session, &[]).unwrap();
        assert_eq!(result, vec![StackValue::integer(42i64)]);
    }

    #[test]
    fn get_contract_resolves_a_deployed_hash() {
        let hash = UInt160::from_bytes(&[7u8; 20]).unwrap();
        let mut snapshot = MemorySnapshot::new();
        snapshot.put_contract(ContractState::new(
            1,
            hash,
            vec![0x51],
            ContractManifest {
                name: "T".into(),
                has_storage: false,
            },
        ));
        let mut session = session_with(snapshot);
        let args = [StackValue::byte_array(hash.as_bytes().to_vec())];
        let result = GetContract.invoke(&mut session, &args).unwrap();
        assert_eq!(result, vec![StackValue::interop_handle(InteropHandle::Contract(hash))]);
    }

    #[test]
    fn get_contract_returns_empty_byte_string_for_an_unknown_hash() {
        let mut session = session_with(MemorySnapshot::new());
        let args = [StackValue::byte_array(vec![1u8; 20])];
        let result = GetContract.invoke(&mut session, &args).unwrap();
        assert_eq!(result, vec![StackValue::byte_array(Vec::new())]);
    }

    #[test]
    fn get_header_returns_empty_byte_string_when_absent() {
        let mut session = session_with(MemorySnapshot::new());
        let args = [StackValue::byte_array(vec![0u8; 32])];
        let result = GetHeader.invoke(&mut session, &args).unwrap();
        assert_eq!(result, vec![StackValue::byte_array(Vec::new())]);
    }

    #[test]
    fn get_transaction_returns_empty_byte_string_when_absent() {
        let mut session = session_with(MemorySnapshot::new());
        let args = [StackValue::byte_array(vec![0u8; 32])];
        let result = GetTransaction.invoke(&mut session, &args).unwrap();
        assert_eq!(result, vec![StackValue::byte_array(Vec::new())]);
    }

    #[test]
    fn get_transaction_height_returns_negative_one_when_absent() {
        let mut session = session_with(MemorySnapshot::new());
        let args = [StackValue::byte_array(vec![0u8; 32])];
        let result = GetTransactionHeight.invoke(&mut session, &args).unwrap();
        assert_eq!(result, vec![StackValue::integer(-1i64)]);
    }
}
