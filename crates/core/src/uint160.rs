//! A 160-bit script hash, used throughout the interop layer to identify
//! contracts and signer accounts.

use crate::CoreError;
use neo_io::{BinaryWriter, IoError, MemoryReader, Serializable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

pub const UINT160_SIZE: usize = 20;

/// A 160-bit unsigned integer, stored as three little-endian limbs so
/// that equality and ordering are cheap register comparisons.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct UInt160 {
    value1: u64,
    value2: u64,
    value3: u32,
}

impl UInt160 {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.value1 == 0 && self.value2 == 0 && self.value3 == 0
    }

    pub fn as_bytes(&self) -> [u8; UINT160_SIZE] {
        let mut out = [0u8; UINT160_SIZE];
        out[0..8].copy_from_slice(&self.value1.to_le_bytes());
        out[8..16].copy_from_slice(&self.value2.to_le_bytes());
        out[16..20].copy_from_slice(&self.value3.to_le_bytes());
        out
    }

    pub fn from_bytes(value: &[u8]) -> Result<Self, CoreError> {
        if value.len() != UINT160_SIZE {
            return Err(CoreError::InvalidFormat {
                message: format!("UInt160 expects {UINT160_SIZE} bytes, got {}", value.len()),
            });
        }
        Ok(Self {
            value1: u64::from_le_bytes(value[0..8].try_into().unwrap()),
            value2: u64::from_le_bytes(value[8..16].try_into().unwrap()),
            value3: u32::from_le_bytes(value[16..20].try_into().unwrap()),
        })
    }

    /// Computes the script hash (Hash160) of a verification/contract script.
    pub fn from_script(script: &[u8]) -> Self {
        Self::from_bytes(&neo_cryptography::hash160(script)).unwrap_or_default()
    }

    pub fn to_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.as_bytes()))
    }
}

impl fmt::Display for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl fmt::Debug for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt160({})", self.to_hex_string())
    }
}

impl PartialOrd for UInt160 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UInt160 {
    /// Lexicographic comparison, most significant limb first, per
    /// spec.md §3 ("compared lexicographically").
    fn cmp(&self, other: &Self) -> Ordering {
        self.value3
            .cmp(&other.value3)
            .then_with(|| self.value2.cmp(&other.value2))
            .then_with(|| self.value1.cmp(&other.value1))
    }
}

impl TryFrom<&[u8]> for UInt160 {
    type Error = CoreError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(data)
    }
}

impl Serializable for UInt160 {
    fn size(&self) -> usize {
        UINT160_SIZE
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> Result<(), IoError> {
        writer.write_bytes(&self.as_bytes())
    }

    fn deserialize(reader: &mut MemoryReader) -> Result<Self, IoError> {
        let bytes = reader.read_bytes(UINT160_SIZE)?;
        Self::from_bytes(&bytes).map_err(|e| IoError::format_exception("UInt160", &e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_bytes() {
        let bytes = [7u8; 20];
        let hash = UInt160::from_bytes(&bytes).unwrap();
        assert_eq!(hash.as_bytes(), bytes);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(UInt160::from_bytes(&[0u8; 19]).is_err());
    }

    #[test]
    fn ordering_is_most_significant_first() {
        let low = UInt160 {
            value1: 0,
            value2: 0,
            value3: 1,
        };
        let high = UInt160 {
            value1: u64::MAX,
            value2: u64::MAX,
            value3: 2,
        };
        assert!(high > low);
    }
}
