//! Decoding of compressed secp256r1 points and derivation of the
//! single-signature redeem-script hash used by `Runtime.CheckWitness`.

use crate::hash::hash160;
use p256::EncodedPoint;
use thiserror::Error;

/// Errors raised while decoding a public key or building a witness script.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WitnessScriptError {
    #[error("invalid secp256r1 compressed point: {0}")]
    InvalidPoint(String),
}

/// Opcode bytes used to build the single-signature verification script,
/// matching the shape `PUSHDATA1 <len> <pubkey> SYSCALL CheckSig`.
const OP_PUSHDATA1: u8 = 0x0c;
const OP_SYSCALL: u8 = 0x41;
const SYSCALL_CHECKSIG: &[u8] = b"System.Crypto.CheckSig";

/// Validates that `point` is a well-formed 33-byte compressed secp256r1
/// public key.
pub fn validate_compressed_point(point: &[u8]) -> Result<(), WitnessScriptError> {
    if point.len() != 33 {
        return Err(WitnessScriptError::InvalidPoint(format!(
            "expected 33 bytes, got {}",
            point.len()
        )));
    }
    let encoded = EncodedPoint::from_bytes(point)
        .map_err(|e| WitnessScriptError::InvalidPoint(e.to_string()))?;
    // Confirm the point actually decompresses to a curve point rather than
    // merely having the right length and prefix byte.
    let decoded: Option<p256::AffinePoint> = p256::AffinePoint::from_encoded_point(&encoded).into();
    if decoded.is_none() {
        return Err(WitnessScriptError::InvalidPoint(
            "point is not on the secp256r1 curve".to_string(),
        ));
    }
    Ok(())
}

/// Builds the single-signature verification script for a compressed
/// secp256r1 public key, matching the teacher's
/// `Contract::create_signature_redeem_script` shape.
pub fn single_sig_redeem_script(compressed_point: &[u8]) -> Vec<u8> {
    let mut script = Vec::with_capacity(2 + compressed_point.len() + 1 + SYSCALL_CHECKSIG.len());
    script.push(OP_PUSHDATA1);
    script.push(compressed_point.len() as u8);
    script.extend_from_slice(compressed_point);
    script.push(OP_SYSCALL);
    script.extend_from_slice(SYSCALL_CHECKSIG);
    script
}

/// Derives the Hash160 script hash a 33-byte compressed public key would
/// produce as a single-signature account, i.e.
/// `hash_of(single_sig_script(p))` from spec.md's witness law.
pub fn script_hash_from_compressed_point(
    compressed_point: &[u8],
) -> Result<[u8; 20], WitnessScriptError> {
    validate_compressed_point(compressed_point)?;
    Ok(hash160(&single_sig_redeem_script(compressed_point)))
}
