//! Ephemeral Ed25519 keypairs for login attempts.
//!
//! A keypair lives for exactly one login attempt. It is generated from fresh
//! OS randomness when the attempt starts, optionally rehydrated from a stored
//! seed after the OAuth redirect, and discarded when the attempt completes.

use ed25519_dalek::{Signature, Signer, SigningKey};
use std::fmt;
use zeroize::Zeroize;

use crate::base64url::base64url_encode;
use crate::error::CryptoError;

/// Ed25519 seed and public key length in bytes.
pub const SEED_LENGTH: usize = 32;

/// A short-lived Ed25519 keypair bound to a single login attempt.
pub struct EphemeralKeypair {
    signing_key: SigningKey,
}

impl EphemeralKeypair {
    /// Generate a fresh keypair from OS randomness.
    ///
    /// Each call produces an independent keypair; seeds are never reused
    /// across attempts.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut seed = [0u8; SEED_LENGTH];
        getrandom::getrandom(&mut seed).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();
        Ok(Self { signing_key })
    }

    /// Rebuild a keypair from a 32-byte seed.
    ///
    /// Deterministic: the same seed always yields the same keypair. Used to
    /// rehydrate a persisted attempt after the provider redirects back, and
    /// for seeded address derivation.
    pub fn from_seed(seed: &[u8]) -> Result<Self, CryptoError> {
        let seed: &[u8; SEED_LENGTH] =
            seed.try_into().map_err(|_| CryptoError::InvalidSeedLength {
                expected: SEED_LENGTH,
                got: seed.len(),
            })?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(seed),
        })
    }

    /// The public key as raw bytes (32 bytes).
    pub fn public_key_bytes(&self) -> [u8; SEED_LENGTH] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// The public key as base64url.
    pub fn public_key_base64(&self) -> String {
        base64url_encode(&self.public_key_bytes())
    }

    /// The secret seed as raw bytes. Only ever written into the scoped
    /// attempt store; never logged or sent over the network.
    pub fn seed_bytes(&self) -> [u8; SEED_LENGTH] {
        self.signing_key.to_bytes()
    }

    /// Sign a message with the ephemeral key (64-byte Ed25519 signature).
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        let signature: Signature = self.signing_key.sign(message);
        signature.to_bytes()
    }
}

impl fmt::Debug for EphemeralKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EphemeralKeypair")
            .field("public_key", &self.public_key_base64())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_unique_keypairs() {
        let a = EphemeralKeypair::generate().unwrap();
        let b = EphemeralKeypair::generate().unwrap();
        assert_ne!(a.public_key_bytes(), b.public_key_bytes());
    }

    #[test]
    fn from_seed_is_deterministic() {
        let seed = [7u8; SEED_LENGTH];
        let a = EphemeralKeypair::from_seed(&seed).unwrap();
        let b = EphemeralKeypair::from_seed(&seed).unwrap();
        assert_eq!(a.public_key_bytes(), b.public_key_bytes());
    }

    #[test]
    fn seed_round_trips() {
        let original = EphemeralKeypair::generate().unwrap();
        let restored = EphemeralKeypair::from_seed(&original.seed_bytes()).unwrap();
        assert_eq!(original.public_key_bytes(), restored.public_key_bytes());
    }

    #[test]
    fn rejects_wrong_seed_length() {
        assert!(EphemeralKeypair::from_seed(&[0u8; 16]).is_err());
        assert!(EphemeralKeypair::from_seed(&[0u8; 64]).is_err());
    }

    #[test]
    fn signature_is_64_bytes() {
        let keypair = EphemeralKeypair::generate().unwrap();
        assert_eq!(keypair.sign(b"test").len(), 64);
    }

    #[test]
    fn debug_does_not_leak_seed() {
        let keypair = EphemeralKeypair::from_seed(&[9u8; SEED_LENGTH]).unwrap();
        let debug = format!("{:?}", keypair);
        assert!(!debug.contains(&hex::encode([9u8; SEED_LENGTH])));
    }
}
