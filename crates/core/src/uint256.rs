//! A 256-bit hash value, used for block, transaction, and container hashes.

use crate::CoreError;
use neo_io::{BinaryWriter, IoError, MemoryReader, Serializable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

pub const UINT256_SIZE: usize = 32;

/// A 256-bit unsigned integer, stored as four little-endian limbs.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct UInt256 {
    value1: u64,
    value2: u64,
    value3: u64,
    value4: u64,
}

impl UInt256 {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.value1 == 0 && self.value2 == 0 && self.value3 == 0 && self.value4 == 0
    }

    pub fn as_bytes(&self) -> [u8; UINT256_SIZE] {
        let mut out = [0u8; UINT256_SIZE];
        out[0..8].copy_from_slice(&self.value1.to_le_bytes());
        out[8..16].copy_from_slice(&self.value2.to_le_bytes());
        out[16..24].copy_from_slice(&self.value3.to_le_bytes());
        out[24..32].copy_from_slice(&self.value4.to_le_bytes());
        out
    }

    pub fn from_bytes(value: &[u8]) -> Result<Self, CoreError> {
        if value.len() != UINT256_SIZE {
            return Err(CoreError::InvalidFormat {
                message: format!("UInt256 expects {UINT256_SIZE} bytes, got {}", value.len()),
            });
        }
        Ok(Self {
            value1: u64::from_le_bytes(value[0..8].try_into().unwrap()),
            value2: u64::from_le_bytes(value[8..16].try_into().unwrap()),
            value3: u64::from_le_bytes(value[16..24].try_into().unwrap()),
            value4: u64::from_le_bytes(value[24..32].try_into().unwrap()),
        })
    }

    /// Computes the double-SHA256 hash of `data`.
    pub fn hash(data: &[u8]) -> Self {
        Self::from_bytes(&neo_cryptography::hash256(data)).unwrap_or_default()
    }

    pub fn to_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.as_bytes()))
    }
}

impl fmt::Display for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl fmt::Debug for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt256({})", self.to_hex_string())
    }
}

impl PartialOrd for UInt256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UInt256 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value4
            .cmp(&other.value4)
            .then_with(|| self.value3.cmp(&other.value3))
            .then_with(|| self.value2.cmp(&other.value2))
            .then_with(|| self.value1.cmp(&other.value1))
    }
}

impl TryFrom<&[u8]> for UInt256 {
    type Error = CoreError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(data)
    }
}

impl Serializable for UInt256 {
    fn size(&self) -> usize {
        UINT256_SIZE
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> Result<(), IoError> {
        writer.write_bytes(&self.as_bytes())
    }

    fn deserialize(reader: &mut MemoryReader) -> Result<Self, IoError> {
        let bytes = reader.read_bytes(UINT256_SIZE)?;
        Self::from_bytes(&bytes).map_err(|e| IoError::format_exception("UInt256", &e.to_string()))
    }
}
