//! Block and block header, the unit `System.Blockchain`/`System.Header`/
//! `System.Block` syscalls query against.

use crate::{ScriptContainer, Transaction, UInt160, UInt256, Witness};
use neo_io::{BinaryWriter, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: u32,
    pub previous_hash: UInt256,
    pub merkle_root: UInt256,
    pub timestamp: u64,
    pub nonce: u64,
    pub index: u32,
    pub primary_index: u8,
    pub next_consensus: UInt160,
    pub witnesses: Vec<Witness>,
}

impl BlockHeader {
    fn write_unsigned(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_u32(self.version)?;
        self.previous_hash.serialize(writer)?;
        self.merkle_root.serialize(writer)?;
        writer.write_u64(self.timestamp)?;
        writer.write_u64(self.nonce)?;
        writer.write_u32(self.index)?;
        writer.write_byte(self.primary_index)?;
        self.next_consensus.serialize(writer)
    }

    /// The header hash, computed over every field but the witnesses.
    pub fn hash(&self) -> UInt256 {
        let mut writer = BinaryWriter::new();
        self.write_unsigned(&mut writer)
            .expect("writing to an in-memory buffer cannot fail");
        UInt256::hash(&writer.to_bytes())
    }
}

impl Serializable for BlockHeader {
    fn size(&self) -> usize {
        let mut writer = BinaryWriter::new();
        self.serialize(&mut writer).expect("in-memory buffer cannot fail");
        writer.position()
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        self.write_unsigned(writer)?;
        writer.write_var_int(self.witnesses.len() as u64)?;
        for witness in &self.witnesses {
            witness.serialize(writer)?;
        }
        Ok(())
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let version = reader.read_u32()?;
        let previous_hash = UInt256::deserialize(reader)?;
        let merkle_root = UInt256::deserialize(reader)?;
        let timestamp = reader.read_u64()?;
        let nonce = reader.read_u64()?;
        let index = reader.read_u32()?;
        let primary_index = reader.read_byte()?;
        let next_consensus = UInt160::deserialize(reader)?;
        let witness_count = reader.read_var_int(16)? as usize;
        let mut witnesses = Vec::with_capacity(witness_count);
        for _ in 0..witness_count {
            witnesses.push(Witness::deserialize(reader)?);
        }
        Ok(Self {
            version,
            previous_hash,
            merkle_root,
            timestamp,
            nonce,
            index,
            primary_index,
            next_consensus,
            witnesses,
        })
    }
}

/// A block header is its own script container while being persisted: the
/// set of script hashes it "declares must have signed it" is the set its
/// witnesses assert, since block headers carry witnesses but no `Signer`
/// list (signer scopes are a transaction-only concept).
impl ScriptContainer for BlockHeader {
    fn required_signers(&self) -> Vec<UInt160> {
        self.witnesses.iter().map(Witness::script_hash).collect()
    }

    fn container_hash(&self) -> UInt256 {
        self.hash()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn hash(&self) -> UInt256 {
        self.header.hash()
    }

    pub fn index(&self) -> u32 {
        self.header.index
    }

    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> BlockHeader {
        BlockHeader {
            version: 0,
            previous_hash: UInt256::zero(),
            merkle_root: UInt256::zero(),
            timestamp: 1_600_000_000,
            nonce: 42,
            index: 10,
            primary_index: 0,
            next_consensus: UInt160::zero(),
            witnesses: vec![Witness::empty()],
        }
    }

    #[test]
    fn hash_excludes_witnesses() {
        let mut header = sample_header();
        let before = header.hash();
        header.witnesses = vec![Witness::new(vec![1], vec![2])];
        assert_eq!(before, header.hash());
    }

    #[test]
    fn round_trips_through_wire_format() {
        let header = sample_header();
        let mut writer = BinaryWriter::new();
        header.serialize(&mut writer).unwrap();
        let mut reader = MemoryReader::new(&writer.to_bytes());
        let back = BlockHeader::deserialize(&mut reader).unwrap();
        assert_eq!(header, back);
    }

    #[test]
    fn required_signers_are_derived_from_witnesses() {
        let mut header = sample_header();
        header.witnesses = vec![Witness::new(vec![], vec![9, 9, 9])];
        assert_eq!(
            header.required_signers(),
            vec![Witness::new(vec![], vec![9, 9, 9]).script_hash()]
        );
    }
}
