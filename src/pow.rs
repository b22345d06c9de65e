//! Proof-of-work verification and client-side solving (C1).
//!
//! Hash input layout, fixed: 16-byte target address (network order) ||
//! claimant UTF-8 bytes (no length prefix, no terminator) || 8-byte
//! big-endian nonce. Hashed with SHA-256; validity is leading-zero-bit
//! count >= required difficulty.

use sha2::{Digest, Sha256};

use crate::address::Address;
use crate::claimant::Claimant;
use crate::error::PowError;

/// Build the fixed hash input for a (target, claimant, nonce) triple.
fn hash_input(target: Address, claimant: &Claimant, nonce: u64) -> Vec<u8> {
    let addr_bytes = target.to_bytes();
    let claimant_bytes = claimant.as_str().as_bytes();
    let mut buf = Vec::with_capacity(addr_bytes.len() + claimant_bytes.len() + 8);
    buf.extend_from_slice(&addr_bytes);
    buf.extend_from_slice(claimant_bytes);
    buf.extend_from_slice(&nonce.to_be_bytes());
    buf
}

/// SHA-256 of the fixed hash input.
pub fn hash(target: Address, claimant: &Claimant, nonce: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(hash_input(target, claimant, nonce));
    hasher.finalize().into()
}

/// Count leading zero bits of a 256-bit hash, most-significant byte first.
pub fn leading_zero_bits(hash: &[u8; 32]) -> u32 {
    let mut count = 0u32;
    for byte in hash {
        if *byte == 0 {
            count += 8;
            continue;
        }
        count += byte.leading_zeros();
        break;
    }
    count
}

/// `true` iff `hash` clears the required difficulty (leading-zero-bit
/// count >= `difficulty`). Pure, total: never fails.
pub fn is_valid(hash: &[u8; 32], difficulty: u8) -> bool {
    leading_zero_bits(hash) >= u32::from(difficulty)
}

/// Verify a (target, claimant, nonce) submission against a required
/// difficulty in one call.
pub fn verify(target: Address, claimant: &Claimant, nonce: u64, difficulty: u8) -> bool {
    is_valid(&hash(target, claimant, nonce), difficulty)
}

/// Client-side brute-force nonce search.
///
/// Iterates `nonce` from 0 upward until a valid proof is found or
/// `max_attempts` nonces have been tried, whichever comes first.
pub fn solve(
    target: Address,
    claimant: &Claimant,
    difficulty: u8,
    max_attempts: u64,
) -> Result<u64, PowError> {
    for nonce in 0..max_attempts {
        if verify(target, claimant, nonce, difficulty) {
            return Ok(nonce);
        }
    }
    Err(PowError::SolveExhausted(max_attempts))
}
