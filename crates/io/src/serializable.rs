//! Serializable trait matching C# `ISerializable`.

use crate::{BinaryWriter, IoResult, MemoryReader};

/// Types that can round-trip through Neo's binary wire format.
pub trait Serializable: Sized {
    /// The exact serialized size in bytes.
    fn size(&self) -> usize;

    /// Writes this value to `writer`.
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()>;

    /// Reads a value from `reader`.
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self>;
}
