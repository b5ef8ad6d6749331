//! Cryptographic primitives for the Seaglass login flow.
//!
//! Everything here is pure and deterministic apart from key/randomness
//! generation: nonce binding, ephemeral Ed25519 keypairs, and canonical
//! wallet address derivation.

mod address;
mod base64url;
mod error;
mod keypair;
mod nonce;

pub use address::{derive_address_from_nonce, wallet_address, ADDRESS_SCHEME_ED25519};
pub use base64url::{base64url_decode, base64url_encode};
pub use error::CryptoError;
pub use keypair::{EphemeralKeypair, SEED_LENGTH};
pub use nonce::{compute_nonce, generate_randomness, NONCE_LENGTH};
