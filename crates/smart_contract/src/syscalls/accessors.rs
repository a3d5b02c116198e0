//! Field accessors over the handles `Blockchain.GetHeader`/`GetBlock`
//! hand out: `System.Header.*`, `System.Block.*`, `System.Transaction.*`
//! — spec.md §4.6.

use crate::registry::InteropHandler;
use crate::session::ServiceSession;
use crate::syscalls::args;
use crate::{Error, Result};
use neo_vm::{InteropHandle, StackValue};
use num_traits::ToPrimitive;

fn header_handle<'a>(
    args: &'a [StackValue],
    index: usize,
    method: &'static str,
) -> Result<&'a std::rc::Rc<neo_core::BlockHeader>> {
    let h = crate::syscalls::args::handle(args, index, method)?;
    h.as_header().ok_or_else(|| {
        Error::Vm(neo_vm::VmError::HandleKindMismatch {
            expected: "Header",
            found: h.kind_name(),
        })
    })
}

fn block_handle<'a>(
    args: &'a [StackValue],
    index: usize,
    method: &'static str,
) -> Result<&'a std::rc::Rc<neo_core::Block>> {
    let h = crate::syscalls::args::handle(args, index, method)?;
    h.as_block().ok_or_else(|| {
        Error::Vm(neo_vm::VmError::HandleKindMismatch {
            expected: "Block",
            found: h.kind_name(),
        })
    })
}

fn transaction_handle<'a>(
    args: &'a [StackValue],
    index: usize,
    method: &'static str,
) -> Result<&'a std::rc::Rc<neo_core::Transaction>> {
    let h = crate::syscalls::args::handle(args, index, method)?;
    h.as_transaction().ok_or_else(|| {
        Error::Vm(neo_vm::VmError::HandleKindMismatch {
            expected: "Transaction",
            found: h.kind_name(),
        })
    })
}

pub struct HeaderGetIndex;
impl InteropHandler for HeaderGetIndex {
    fn name(&self) -> &'static str {
        "System.Header.GetIndex"
    }
    fn price(&self) -> Option<i64> {
        Some(1)
    }
    fn invoke(&self, _session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let header = header_handle(args, 0, self.name())?;
        Ok(vec![StackValue::integer(header.index as i64)])
    }
}

pub struct HeaderGetHash;
impl InteropHandler for HeaderGetHash {
    fn name(&self) -> &'static str {
        "System.Header.GetHash"
    }
    fn price(&self) -> Option<i64> {
        Some(1)
    }
    fn invoke(&self, _session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let header = header_handle(args, 0, self.name())?;
        Ok(vec![StackValue::byte_array(header.hash().as_bytes().to_vec())])
    }
}

pub struct HeaderGetPrevHash;
impl InteropHandler for HeaderGetPrevHash {
    fn name(&self) -> &'static str {
        "System.Header.GetPrevHash"
    }
    fn price(&self) -> Option<i64> {
        Some(1)
    }
    fn invoke(&self, _session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let header = header_handle(args, 0, self.name())?;
        Ok(vec![StackValue::byte_array(header.previous_hash.as_bytes().to_vec())])
    }
}

pub struct HeaderGetTimestamp;
impl InteropHandler for HeaderGetTimestamp {
    fn name(&self) -> &'static str {
        "System.Header.GetTimestamp"
    }
    fn price(&self) -> Option<i64> {
        Some(1)
    }
    fn invoke(&self, _session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let header = header_handle(args, 0, self.name())?;
        Ok(vec![StackValue::integer(header.timestamp as i64)])
    }
}

pub struct BlockGetTransactionCount;
impl InteropHandler for BlockGetTransactionCount {
    fn name(&self) -> &'static str {
        "System.Block.GetTransactionCount"
    }
    fn price(&self) -> Option<i64> {
        Some(1)
    }
    fn invoke(&self, _session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let block = block_handle(args, 0, self.name())?;
        Ok(vec![StackValue::integer(block.transactions.len() as i64)])
    }
}

pub struct BlockGetTransactions;
impl InteropHandler for BlockGetTransactions {
    fn name(&self) -> &'static str {
        "System.Block.GetTransactions"
    }
    fn price(&self) -> Option<i64> {
        Some(1)
    }
    fn invoke(&self, _session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let block = block_handle(args, 0, self.name())?;
        if block.transactions.len() > neo_config::MAX_ARRAY_SIZE {
            return Err(Error::InvalidArguments {
                method: self.name(),
                reason: format!(
                    "transaction count {} exceeds MAX_ARRAY_SIZE {}",
                    block.transactions.len(),
                    neo_config::MAX_ARRAY_SIZE
                ),
            });
        }
        let items = block
            .transactions
            .iter()
            .map(|tx| StackValue::interop_handle(InteropHandle::Transaction(std::rc::Rc::new(tx.clone()))))
            .collect();
        Ok(vec![StackValue::array(items)])
    }
}

pub struct BlockGetTransaction;
impl InteropHandler for BlockGetTransaction {
    fn name(&self) -> &'static str {
        "System.Block.GetTransaction"
    }
    fn price(&self) -> Option<i64> {
        Some(1)
    }
    fn invoke(&self, _session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let block = block_handle(args, 0, self.name())?;
        let index = args::integer(args, 1, self.name())?;
        let index: usize = index.to_usize().ok_or_else(|| Error::InvalidArguments {
            method: self.name(),
            reason: "transaction index out of range".to_string(),
        })?;
        let tx = block
            .transactions
            .get(index)
            .ok_or(Error::IndexOutOfBounds {
                index: index as i64,
                len: block.transactions.len(),
            })?;
        Ok(vec![StackValue::interop_handle(InteropHandle::Transaction(
            std::rc::Rc::new(tx.clone()),
        ))])
    }
}

pub struct TransactionGetHash;
impl InteropHandler for TransactionGetHash {
    fn name(&self) -> &'static str {
        "System.Transaction.GetHash"
    }
    fn price(&self) -> Option<i64> {
        Some(1)
    }
    fn invoke(&self, _session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let tx = transaction_handle(args, 0, self.name())?;
        Ok(vec![StackValue::byte_array(tx.hash().as_bytes().to_vec())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script_container::ScriptContainerRef;
    use crate::snapshot::MemorySnapshot;
    use neo_core::{BlockHeader, Transaction, UInt160, UInt256, Witness};
    use neo_vm::TriggerType;
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

    fn sample_header() -> BlockHeader {
        BlockHeader {
            version: 0,
            previous_hash: UInt256::zero(),
            merkle_root: UInt256::zero(),
            timestamp: 123,
            nonce: 0,
            index: 9,
            primary_index: 0,
            next_consensus: UInt160::zero(),
            witnesses: vec![Witness::empty()],
        }
    }

    #[test]
    fn header_get_index_reads_the_wrapped_value() {
        let mut s = session();
        let handle = StackValue::interop_handle(InteropHandle::Header(Rc::new(sample_header())));
        let result = HeaderGetIndex.invoke(&mut s, &[handle]).unwrap();
        assert_eq!(result, vec![StackValue::integer(9i64)]);
    }

    #[test]
    fn header_get_index_rejects_a_mismatched_handle_kind() {
        let mut s = session();
        let handle = StackValue::interop_handle(InteropHandle::Contract(UInt160::zero()));
        assert!(HeaderGetIndex.invoke(&mut s, &[handle]).is_err());
    }

    #[test]
    fn block_get_transaction_out_of_range_is_rejected() {
        let mut s = session();
        let block = neo_core::Block {
            header: sample_header(),
            transactions: vec![],
        };
        let handle = StackValue::interop_handle(InteropHandle::Block(Rc::new(block)));
        let args = [handle, StackValue::integer(0i64)];
        assert!(BlockGetTransaction.invoke(&mut s, &args).is_err());
    }

    #[test]
    fn block_get_transactions_rejects_a_count_over_max_array_size() {
        let mut s = session();
        let tx = Transaction::new(0, 0, 0, 0, 0, vec![], vec![], vec![], vec![]);
        let transactions = vec![tx; neo_config::MAX_ARRAY_SIZE + 1];
        let block = neo_core::Block {
            header: sample_header(),
            transactions,
        };
        let handle = StackValue::interop_handle(InteropHandle::Block(Rc::new(block)));
        assert!(BlockGetTransactions.invoke(&mut s, &[handle]).is_err());
    }
}
