//! Deployed contract state as observed from the interop surface.
//!
//! Deployment itself (NEF parsing, manifest compilation, checksum
//! verification) is outside this layer; a `ContractState` here carries
//! only what the syscall catalogue actually reads.

use neo_core::UInt160;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractState {
    pub id: i32,
    pub update_counter: u16,
    pub hash: UInt160,
    /// The deployed script. Stands in for the full NEF file (compiler,
    /// source map, method tokens, checksum) which belongs to the
    /// deployment pipeline, not this interop surface.
    pub script: Vec<u8>,
    pub manifest: ContractManifest,
}

impl ContractState {
    pub fn new(id: i32, hash: UInt160, script: Vec<u8>, manifest: ContractManifest) -> Self {
        Self {
            id,
            update_counter: 0,
            hash,
            script,
            manifest,
        }
    }
}

/// The subset of a contract's manifest the storage-namespace invariants
/// and blockchain-query services actually consult.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContractManifest {
    pub name: String,
    pub has_storage: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_contract_starts_at_update_counter_zero() {
        let state = ContractState::new(
            1,
            UInt160::zero(),
            vec![0x51],
            ContractManifest {
                name: "Test".into(),
                has_storage: true,
            },
        );
        assert_eq!(state.update_counter, 0);
    }
}
