//! Nonce binding for the OAuth round-trip.
//!
//! The nonce commits to the ephemeral public key, the expiry epoch, and a
//! client-secret randomness value. It is embedded in the authorization
//! request and must reappear unchanged in the identity token's `nonce`
//! claim. Hashing makes it one-way: the provider sees the nonce but cannot
//! recover the randomness or link two attempts.

use sha2::{Digest, Sha256};

use crate::base64url::base64url_encode;
use crate::error::CryptoError;

/// Length of a computed nonce in characters (43 = base64url of 32 bytes).
pub const NONCE_LENGTH: usize = 43;

/// Domain separator for the nonce hash. NUL delimiters between fields
/// prevent ambiguous concatenations.
const NONCE_INFO_PREFIX: &[u8] = b"seaglass:nonce:v1\0";

/// Number of random bytes behind `generate_randomness`.
const RANDOMNESS_LENGTH: usize = 24;

/// Generate the per-attempt randomness value (32 characters of base64url).
///
/// The randomness stays client-side for the whole flow; only the nonce
/// derived from it is ever sent to the identity provider.
pub fn generate_randomness() -> Result<String, CryptoError> {
    let mut bytes = [0u8; RANDOMNESS_LENGTH];
    getrandom::getrandom(&mut bytes).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(base64url_encode(&bytes))
}

/// Compute the single-use nonce binding an attempt to its OAuth round-trip.
///
/// `nonce = base64url(SHA-256(prefix || public_key || 0 || max_epoch_be || 0 || randomness))`
///
/// Pure and deterministic: the same (public key, epoch, randomness) triple
/// always produces the same nonce, and distinct triples collide only with
/// negligible probability.
pub fn compute_nonce(public_key: &[u8], max_epoch: u64, randomness: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(NONCE_INFO_PREFIX);
    hasher.update(public_key);
    hasher.update([0u8]);
    hasher.update(max_epoch.to_be_bytes());
    hasher.update([0u8]);
    hasher.update(randomness.as_bytes());
    base64url_encode(&hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn randomness_is_32_chars() {
        assert_eq!(generate_randomness().unwrap().len(), 32);
    }

    #[test]
    fn randomness_is_unique() {
        let r1 = generate_randomness().unwrap();
        let r2 = generate_randomness().unwrap();
        assert_ne!(r1, r2);
    }

    #[test]
    fn nonce_is_deterministic() {
        let pk = [3u8; 32];
        let a = compute_nonce(&pk, 102, "randomness");
        let b = compute_nonce(&pk, 102, "randomness");
        assert_eq!(a, b);
        assert_eq!(a.len(), NONCE_LENGTH);
    }

    #[test]
    fn nonce_is_base64url() {
        let nonce = compute_nonce(&[1u8; 32], 5, "r");
        assert!(nonce
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn differs_with_public_key() {
        let a = compute_nonce(&[1u8; 32], 102, "r");
        let b = compute_nonce(&[2u8; 32], 102, "r");
        assert_ne!(a, b);
    }

    #[test]
    fn differs_with_epoch() {
        let pk = [1u8; 32];
        assert_ne!(compute_nonce(&pk, 102, "r"), compute_nonce(&pk, 103, "r"));
    }

    #[test]
    fn differs_with_randomness() {
        let pk = [1u8; 32];
        assert_ne!(compute_nonce(&pk, 102, "a"), compute_nonce(&pk, 102, "b"));
    }

    #[test]
    fn delimiters_prevent_field_shifts() {
        // Moving a byte between fields must not produce the same digest
        let a = compute_nonce(&[1, 2, 3], 0, "x");
        let b = compute_nonce(&[1, 2], 0, "3x");
        assert_ne!(a, b);
    }

    #[test]
    fn no_collisions_across_random_attempts() {
        let pk = [1u8; 32];
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let randomness = generate_randomness().unwrap();
            assert!(seen.insert(compute_nonce(&pk, 102, &randomness)));
        }
    }
}
