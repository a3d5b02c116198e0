//! Hashing and elliptic-curve helpers used by the Neo interop layer.

mod hash;
mod witness_script;

pub use hash::{hash160, hash256, ripemd160, sha256};
pub use witness_script::{
    script_hash_from_compressed_point, single_sig_redeem_script, validate_compressed_point,
    WitnessScriptError,
};
