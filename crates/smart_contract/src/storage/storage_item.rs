//! A stored value and its mutability flag: `(value_bytes, is_constant)`.

use neo_config::MAX_STORAGE_VALUE_SIZE;
use neo_io::{BinaryWriter, IoResult, MemoryReader, Serializable};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorageItem {
    pub value_bytes: Vec<u8>,
    pub is_constant: bool,
}

impl StorageItem {
    pub fn new(value_bytes: Vec<u8>, is_constant: bool) -> Self {
        Self {
            value_bytes,
            is_constant,
        }
    }

    /// A copy of this item latched constant, used by `Storage.PutEx`.
    pub fn as_constant(&self) -> Self {
        Self {
            value_bytes: self.value_bytes.clone(),
            is_constant: true,
        }
    }
}

impl Serializable for StorageItem {
    fn size(&self) -> usize {
        4 + self.value_bytes.len() + 1
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_var_bytes(&self.value_bytes)?;
        writer.write_bool(self.is_constant)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let value_bytes = reader.read_var_bytes(MAX_STORAGE_VALUE_SIZE)?;
        let is_constant = reader.read_bool()?;
        Ok(Self {
            value_bytes,
            is_constant,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_copy_preserves_value() {
        let item = StorageItem::new(b"v".to_vec(), false);
        let constant = item.as_constant();
        assert_eq!(constant.value_bytes, item.value_bytes);
        assert!(constant.is_constant);
    }

    #[test]
    fn round_trips_through_wire_format() {
        let item = StorageItem::new(b"value".to_vec(), true);
        let mut writer = BinaryWriter::new();
        item.serialize(&mut writer).unwrap();
        let mut reader = MemoryReader::new(&writer.to_bytes());
        assert_eq!(StorageItem::deserialize(&mut reader).unwrap(), item);
    }
}
