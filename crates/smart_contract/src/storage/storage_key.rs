//! A key into the per-contract storage partition: `(script_hash, key_bytes)`.

use neo_config::{ADDRESS_SIZE, MAX_STORAGE_KEY_SIZE};
use neo_core::UInt160;
use neo_io::{BinaryWriter, IoResult, MemoryReader, Serializable};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey {
    pub script_hash: UInt160,
    pub key_bytes: Vec<u8>,
}

impl StorageKey {
    pub fn new(script_hash: UInt160, key_bytes: Vec<u8>) -> Self {
        Self {
            script_hash,
            key_bytes,
        }
    }

    pub fn has_prefix(&self, prefix: &[u8]) -> bool {
        self.key_bytes.starts_with(prefix)
    }
}

impl Serializable for StorageKey {
    fn size(&self) -> usize {
        ADDRESS_SIZE + 4 + self.key_bytes.len()
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(&self.script_hash.as_bytes())?;
        writer.write_var_bytes(&self.key_bytes)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let bytes = reader.read_bytes(ADDRESS_SIZE)?;
        let script_hash = UInt160::from_bytes(&bytes)
            .map_err(|e| neo_io::IoError::format_exception("StorageKey", &e.to_string()))?;
        let key_bytes = reader.read_var_bytes(MAX_STORAGE_KEY_SIZE)?;
        Ok(Self {
            script_hash,
            key_bytes,
        })
    }
}
