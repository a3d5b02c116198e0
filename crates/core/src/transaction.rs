//! The transaction script container: the verifiable object whose declared
//! signers `Runtime.CheckWitness` consults.

use crate::{Signer, UInt160, UInt256, Witness};
use neo_io::{BinaryWriter, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Serialize};

const MAX_TRANSACTION_ATTRIBUTES: usize = 16;
const MAX_SIGNERS: usize = 16;
const MAX_SCRIPT_SIZE: usize = 65536;

/// A free-form attribute attached to a transaction; carried verbatim since
/// attribute-specific semantics sit outside the interop layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAttribute {
    pub kind: u8,
    pub data: Vec<u8>,
}

/// Anything `Runtime.CheckWitness` can consult for its set of witnessed
/// script hashes, per the witness law `CheckWitness(h) = h ∈
/// script_container.required_signers()`.
pub trait ScriptContainer {
    fn required_signers(&self) -> Vec<UInt160>;
    fn container_hash(&self) -> UInt256;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: u8,
    pub nonce: u32,
    pub system_fee: i64,
    pub network_fee: i64,
    pub valid_until_block: u32,
    pub signers: Vec<Signer>,
    pub attributes: Vec<TransactionAttribute>,
    pub script: Vec<u8>,
    pub witnesses: Vec<Witness>,
}

impl Transaction {
    pub fn new(
        version: u8,
        nonce: u32,
        system_fee: i64,
        network_fee: i64,
        valid_until_block: u32,
        signers: Vec<Signer>,
        attributes: Vec<TransactionAttribute>,
        script: Vec<u8>,
        witnesses: Vec<Witness>,
    ) -> Self {
        Self {
            version,
            nonce,
            system_fee,
            network_fee,
            valid_until_block,
            signers,
            attributes,
            script,
            witnesses,
        }
    }

    /// The signed portion of the transaction, i.e. everything except the
    /// witnesses: the hash commits to intent, not to its proof.
    fn write_unsigned(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_byte(self.version)?;
        writer.write_u32(self.nonce)?;
        writer.write_i64(self.system_fee)?;
        writer.write_i64(self.network_fee)?;
        writer.write_u32(self.valid_until_block)?;
        writer.write_var_int(self.signers.len() as u64)?;
        for signer in &self.signers {
            signer.serialize(writer)?;
        }
        writer.write_var_int(self.attributes.len() as u64)?;
        for attr in &self.attributes {
            writer.write_byte(attr.kind)?;
            writer.write_var_bytes(&attr.data)?;
        }
        writer.write_var_bytes(&self.script)
    }

    pub fn hash(&self) -> UInt256 {
        let mut writer = BinaryWriter::new();
        // write_unsigned only fails on allocator-level errors, which never
        // occur with an in-memory BytesMut buffer.
        self.write_unsigned(&mut writer)
            .expect("writing to an in-memory buffer cannot fail");
        UInt256::hash(&writer.to_bytes())
    }
}

impl ScriptContainer for Transaction {
    /// The union of every declared signer's account with every witness's
    /// verified script hash. Scope-specific filtering (`CalledByEntry` vs
    /// `Global` vs `CustomContracts`) depends on the VM's call-stack
    /// depth, which sits outside this layer (the VM's evaluation-stack
    /// mechanics are out of scope per spec.md §1) — every signer is
    /// therefore treated as witnessed regardless of scope.
    fn required_signers(&self) -> Vec<UInt160> {
        let mut hashes: Vec<UInt160> = self.signers.iter().map(|s| s.account).collect();
        for witness in &self.witnesses {
            let hash = witness.script_hash();
            if !hashes.contains(&hash) {
                hashes.push(hash);
            }
        }
        hashes
    }

    fn container_hash(&self) -> UInt256 {
        self.hash()
    }
}

impl Serializable for Transaction {
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
        let version = reader.read_byte()?;
        let nonce = reader.read_u32()?;
        let system_fee = reader.read_i64()?;
        let network_fee = reader.read_i64()?;
        let valid_until_block = reader.read_u32()?;

        let signer_count = reader.read_var_int(MAX_SIGNERS as u64)? as usize;
        let mut signers = Vec::with_capacity(signer_count);
        for _ in 0..signer_count {
            signers.push(Signer::deserialize(reader)?);
        }

        let attr_count = reader.read_var_int(MAX_TRANSACTION_ATTRIBUTES as u64)? as usize;
        let mut attributes = Vec::with_capacity(attr_count);
        for _ in 0..attr_count {
            let kind = reader.read_byte()?;
            let data = reader.read_var_bytes(MAX_SCRIPT_SIZE)?;
            attributes.push(TransactionAttribute { kind, data });
        }

        let script = reader.read_var_bytes(MAX_SCRIPT_SIZE)?;

        let witness_count = reader.read_var_int(signers.len() as u64)? as usize;
        let mut witnesses = Vec::with_capacity(witness_count);
        for _ in 0..witness_count {
            witnesses.push(Witness::deserialize(reader)?);
        }

        Ok(Self::new(
            version,
            nonce,
            system_fee,
            network_fee,
            valid_until_block,
            signers,
            attributes,
            script,
            witnesses,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WitnessScope;

    fn sample() -> Transaction {
        Transaction::new(
            0,
            1234,
            0,
            1_000_000,
            100,
            vec![Signer::global(UInt160::from_bytes(&[1u8; 20]).unwrap())],
            vec![],
            vec![0x51],
            vec![Witness::empty()],
        )
    }

    #[test]
    fn hash_excludes_witnesses() {
        let mut tx = sample();
        let hash_before = tx.hash();
        tx.witnesses[0] = Witness::new(vec![0xff; 4], vec![0xee; 4]);
        assert_eq!(hash_before, tx.hash());
    }

    #[test]
    fn required_signers_ignores_scope() {
        let account = UInt160::from_bytes(&[9u8; 20]).unwrap();
        let tx = Transaction::new(
            0,
            0,
            0,
            0,
            0,
            vec![Signer::new(account, WitnessScope::CALLED_BY_ENTRY)],
            vec![],
            vec![],
            vec![],
        );
        assert_eq!(tx.required_signers(), vec![account]);
    }

    #[test]
    fn round_trips_through_wire_format() {
        let tx = sample();
        let mut writer = BinaryWriter::new();
        tx.serialize(&mut writer).unwrap();
        let mut reader = MemoryReader::new(&writer.to_bytes());
        let back = Transaction::deserialize(&mut reader).unwrap();
        assert_eq!(tx, back);
    }
}
