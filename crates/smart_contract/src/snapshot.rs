//! The read/write view of ledger state a session consults: blocks,
//! transactions, contracts, and storage, as keyed lookups plus commit.
//!
//! The concrete key-value store is an external collaborator (spec.md §1);
//! `Snapshot` is the narrow interface the syscall catalogue is written
//! against, and `MemorySnapshot` is the in-memory reference
//! implementation that makes the catalogue and its tests runnable without
//! a real database.

use crate::contract_state::ContractState;
use crate::storage::{StorageItem, StorageKey};
use neo_core::{Block, BlockHeader, Transaction, UInt160, UInt256};
use std::collections::HashMap;
use std::rc::Rc;

/// Either a 32-byte hash or a block height, the two ways `GetHeader` and
/// `GetBlock` may identify a block (spec.md §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLocator {
    Hash(UInt256),
    Height(u32),
}

/// The ledger-state view syscall handlers read and mutate.
///
/// Only `MemorySnapshot` implements this in this crate; a node's real
/// persistence layer provides its own implementation over the durable
/// store.
pub trait Snapshot {
    fn height(&self) -> u32;

    /// The block currently being persisted, if this session is running
    /// under `OnPersist`/`PostPersist`/`Application` during block
    /// processing. `None` for a standalone verification run.
    fn persisting_block(&self) -> Option<Rc<BlockHeader>>;

    /// The timestamp of the chain's current best header, used by
    /// `Runtime.GetTime`'s no-persisting-block fallback.
    fn best_header_timestamp(&self) -> u64;

    fn get_block(&self, locator: BlockLocator) -> Option<Rc<Block>>;
    fn get_header(&self, locator: BlockLocator) -> Option<Rc<BlockHeader>>;
    fn get_transaction(&self, hash: &UInt256) -> Option<Rc<Transaction>>;
    fn get_transaction_height(&self, hash: &UInt256) -> Option<u32>;

    fn get_contract(&self, hash: &UInt160) -> Option<ContractState>;
    fn put_contract(&mut self, contract: ContractState);
    fn remove_contract(&mut self, hash: &UInt160);

    fn get_storage(&self, key: &StorageKey) -> Option<StorageItem>;
    fn put_storage(&mut self, key: StorageKey, item: StorageItem);
    fn delete_storage(&mut self, key: &StorageKey);
    /// Entries whose `key_bytes` begins with `prefix`, scoped to one
    /// contract's partition, in key order.
    fn find_storage(&self, script_hash: &UInt160, prefix: &[u8]) -> Vec<(StorageKey, StorageItem)>;
    /// Removes every entry belonging to `script_hash`'s partition, used by
    /// `Contract.Destroy`.
    fn purge_storage(&mut self, script_hash: &UInt160);

    /// Flushes pending writes to the durable store. A no-op for
    /// `MemorySnapshot`, which has no backing store to flush to.
    fn commit(&mut self);
}

/// In-memory reference `Snapshot`, backed by plain maps.
#[derive(Default)]
pub struct MemorySnapshot {
    height: u32,
    persisting_block: Option<Rc<BlockHeader>>,
    best_header_timestamp: u64,
    blocks_by_hash: HashMap<UInt256, Rc<Block>>,
    blocks_by_height: HashMap<u32, UInt256>,
    transactions: HashMap<UInt256, Rc<Transaction>>,
    transaction_heights: HashMap<UInt256, u32>,
    contracts: HashMap<UInt160, ContractState>,
    storage: HashMap<StorageKey, StorageItem>,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    pub fn set_persisting_block(&mut self, header: Option<Rc<BlockHeader>>) {
        self.persisting_block = header;
    }

    pub fn set_best_header_timestamp(&mut self, timestamp: u64) {
        self.best_header_timestamp = timestamp;
    }

    pub fn insert_block(&mut self, block: Block) {
        let hash = block.hash();
        let index = block.index();
        let block = Rc::new(block);
        self.blocks_by_hash.insert(hash, block);
        self.blocks_by_height.insert(index, hash);
    }

    pub fn insert_transaction(&mut self, tx: Transaction, height: u32) {
        let hash = tx.hash();
        self.transactions.insert(hash, Rc::new(tx));
        self.transaction_heights.insert(hash, height);
    }
}

impl Snapshot for MemorySnapshot {
    fn height(&self) -> u32 {
        self.height
    }

    fn persisting_block(&self) -> Option<Rc<BlockHeader>> {
        self.persisting_block.clone()
    }

    fn best_header_timestamp(&self) -> u64 {
        self.best_header_timestamp
    }

    fn get_block(&self, locator: BlockLocator) -> Option<Rc<Block>> {
        let hash = match locator {
            BlockLocator::Hash(hash) => hash,
            BlockLocator::Height(height) => *self.blocks_by_height.get(&height)?,
        };
        self.blocks_by_hash.get(&hash).cloned()
    }

    fn get_header(&self, locator: BlockLocator) -> Option<Rc<BlockHeader>> {
        self.get_block(locator)
            .map(|block| Rc::new(block.header.clone()))
    }

    fn get_transaction(&self, hash: &UInt256) -> Option<Rc<Transaction>> {
        self.transactions.get(hash).cloned()
    }

    fn get_transaction_height(&self, hash: &UInt256) -> Option<u32> {
        self.transaction_heights.get(hash).copied()
    }

    fn get_contract(&self, hash: &UInt160) -> Option<ContractState> {
        self.contracts.get(hash).cloned()
    }

    fn put_contract(&mut self, contract: ContractState) {
        self.contracts.insert(contract.hash, contract);
    }

    fn remove_contract(&mut self, hash: &UInt160) {
        self.contracts.remove(hash);
    }

    fn get_storage(&self, key: &StorageKey) -> Option<StorageItem> {
        self.storage.get(key).cloned()
    }

    fn put_storage(&mut self, key: StorageKey, item: StorageItem) {
        self.storage.insert(key, item);
    }

    fn delete_storage(&mut self, key: &StorageKey) {
        self.storage.remove(key);
    }

    fn find_storage(&self, script_hash: &UInt160, prefix: &[u8]) -> Vec<(StorageKey, StorageItem)> {
        let mut matches: Vec<(StorageKey, StorageItem)> = self
            .storage
            .iter()
            .filter(|(key, _)| &key.script_hash == script_hash && key.has_prefix(prefix))
            .map(|(key, item)| (key.clone(), item.clone()))
            .collect();
        matches.sort_by(|(a, _), (b, _)| a.key_bytes.cmp(&b.key_bytes));
        matches
    }

    fn purge_storage(&mut self, script_hash: &UInt160) {
        self.storage.retain(|key, _| &key.script_hash != script_hash);
    }

    fn commit(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_storage_is_scoped_to_one_contract_and_prefix() {
        let mut snapshot = MemorySnapshot::new();
        let a = UInt160::from_bytes(&[1u8; 20]).unwrap();
        let b = UInt160::from_bytes(&[2u8; 20]).unwrap();
        snapshot.put_storage(
            StorageKey::new(a, b"prefix:1".to_vec()),
            StorageItem::new(b"va".to_vec(), false),
        );
        snapshot.put_storage(
            StorageKey::new(a, b"other".to_vec()),
            StorageItem::new(b"vb".to_vec(), false),
        );
        snapshot.put_storage(
            StorageKey::new(b, b"prefix:1".to_vec()),
            StorageItem::new(b"vc".to_vec(), false),
        );

        let found = snapshot.find_storage(&a, b"prefix:");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1.value_bytes, b"va");
    }

    #[test]
    fn purge_storage_removes_only_the_named_contract() {
        let mut snapshot = MemorySnapshot::new();
        let a = UInt160::from_bytes(&[1u8; 20]).unwrap();
        let b = UInt160::from_bytes(&[2u8; 20]).unwrap();
        snapshot.put_storage(StorageKey::new(a, b"k".to_vec()), StorageItem::new(vec![], false));
        snapshot.put_storage(StorageKey::new(b, b"k".to_vec()), StorageItem::new(vec![], false));

        snapshot.purge_storage(&a);

        assert!(snapshot.get_storage(&StorageKey::new(a, b"k".to_vec())).is_none());
        assert!(snapshot.get_storage(&StorageKey::new(b, b"k".to_vec())).is_some());
    }
}
