//! Signer and witness scope, declaring which script hashes a script
//! container asserts as witnessed.

use crate::UInt160;
use neo_io::{BinaryWriter, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Serialize};

/// Bit flags controlling the contexts in which a signer's witness applies.
/// Scope-specific filtering depends on VM call-stack depth, which sits
/// outside this crate; `Signer::account` is treated as witnessed in every
/// scope a script container carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WitnessScope(u8);

impl WitnessScope {
    pub const NONE: WitnessScope = WitnessScope(0x00);
    pub const CALLED_BY_ENTRY: WitnessScope = WitnessScope(0x01);
    pub const CUSTOM_CONTRACTS: WitnessScope = WitnessScope(0x10);
    pub const CUSTOM_GROUPS: WitnessScope = WitnessScope(0x20);
    pub const WITNESS_RULES: WitnessScope = WitnessScope(0x40);
    pub const GLOBAL: WitnessScope = WitnessScope(0x80);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn has_flag(self, flag: WitnessScope) -> bool {
        self.0 & flag.0 != 0
    }
}

impl std::ops::BitOr for WitnessScope {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// An account that has signed (or witnessed) the enclosing script container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub account: UInt160,
    pub scopes: WitnessScope,
}

impl Signer {
    pub fn new(account: UInt160, scopes: WitnessScope) -> Self {
        Self { account, scopes }
    }

    pub fn global(account: UInt160) -> Self {
        Self::new(account, WitnessScope::GLOBAL)
    }
}

impl Serializable for Signer {
    fn size(&self) -> usize {
        20 + 1
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        self.account.serialize(writer)?;
        writer.write_byte(self.scopes.bits())
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let account = UInt160::deserialize(reader)?;
        let scopes = WitnessScope::from_bits(reader.read_byte()?);
        Ok(Self::new(account, scopes))
    }
}
