//! Deterministic wallet address derivation.
//!
//! The canonical address is `0x` + hex(Blake2b-256(scheme_flag || public_key)),
//! matching the chain's Ed25519 account address format. Local derivation
//! seeds a keypair from the SHA-256 of the verified token's nonce claim, so
//! the same identity token always maps to the same address.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use sha2::Sha256;

use crate::error::CryptoError;
use crate::keypair::{EphemeralKeypair, SEED_LENGTH};

type Blake2b256 = Blake2b<U32>;

/// Signature scheme flag prepended to the public key before hashing.
pub const ADDRESS_SCHEME_ED25519: u8 = 0x00;

/// Compute the canonical wallet address for an Ed25519 public key.
///
/// Returns a lowercase `0x`-prefixed 64-digit hex string.
pub fn wallet_address(public_key: &[u8]) -> Result<String, CryptoError> {
    if public_key.len() != SEED_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: SEED_LENGTH,
            got: public_key.len(),
        });
    }
    let mut hasher = Blake2b256::new();
    hasher.update([ADDRESS_SCHEME_ED25519]);
    hasher.update(public_key);
    Ok(format!("0x{}", hex::encode(hasher.finalize())))
}

/// Derive a wallet address locally from a verified nonce claim.
///
/// `seed = SHA-256(nonce)` seeds an Ed25519 keypair whose canonical address
/// is returned. Pure: identical nonce input yields a byte-identical address
/// on every call.
pub fn derive_address_from_nonce(nonce: &str) -> Result<String, CryptoError> {
    let seed: [u8; SEED_LENGTH] = Sha256::digest(nonce.as_bytes()).into();
    let keypair = EphemeralKeypair::from_seed(&seed)?;
    wallet_address(&keypair.public_key_bytes())
}
