use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Random number generation failed: {0}")]
    RngFailed(String),

    #[error("Invalid seed length: expected {expected}, got {got}")]
    InvalidSeedLength { expected: usize, got: usize },

    #[error("Invalid public key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },
}
