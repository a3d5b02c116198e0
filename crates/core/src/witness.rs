//! Witness: the `(invocation_script, verification_script)` pair a script
//! container carries to assert a signer's identity to `Runtime.CheckWitness`.

use crate::UInt160;
use neo_cryptography::hash160;
use neo_io::{BinaryWriter, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Serialize};

/// Invocation and verification scripts are capped to the size of a Neo
/// committee multisig (21 of 11 signers), matching the teacher's constants.
const MAX_INVOCATION_SCRIPT: usize = 1024;
const MAX_VERIFICATION_SCRIPT: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    pub invocation_script: Vec<u8>,
    pub verification_script: Vec<u8>,
}

impl Witness {
    pub fn new(invocation_script: Vec<u8>, verification_script: Vec<u8>) -> Self {
        Self {
            invocation_script,
            verification_script,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// The script hash a verifier asserts: Hash160 of the verification script.
    pub fn script_hash(&self) -> UInt160 {
        UInt160::from_bytes(&hash160(&self.verification_script)).unwrap_or_default()
    }
}

impl Default for Witness {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serializable for Witness {
    fn size(&self) -> usize {
        let var_size = |len: usize| -> usize {
            let prefix = if len < 0xfd {
                1
            } else if len <= 0xffff {
                3
            } else {
                5
            };
            prefix + len
        };
        var_size(self.invocation_script.len()) + var_size(self.verification_script.len())
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_var_bytes(&self.invocation_script)?;
        writer.write_var_bytes(&self.verification_script)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let invocation_script = reader.read_var_bytes(MAX_INVOCATION_SCRIPT)?;
        let verification_script = reader.read_var_bytes(MAX_VERIFICATION_SCRIPT)?;
        Ok(Self::new(invocation_script, verification_script))
    }
}
