use thiserror::Error;

/// Login flow errors.
///
/// `MissingToken` is the only variant handled silently: every page load
/// checks for callback parameters, so their absence is the normal state.
/// Everything else surfaces to the login control. `Exchange` is the only
/// recoverable failure; the persisted attempt survives it so the same
/// callback can be retried.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Could not start login attempt: {0}")]
    AttemptCreation(String),

    #[error("No identity token in callback parameters")]
    MissingToken,

    #[error("Identity token could not be decoded: {0}")]
    InvalidToken(String),

    #[error("Identity token nonce does not match the in-flight login attempt")]
    NonceMismatch,

    #[error("Backend exchange failed: {0}")]
    Exchange(String),

    #[error("Backend rejected the identity token: {0}")]
    Rejected(String),

    #[error("Missing configuration value: {0}")]
    MissingConfig(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Stored login attempt is corrupt: {0}")]
    CorruptAttempt(String),

    #[error("Crypto error: {0}")]
    Crypto(#[from] seaglass_crypto::CryptoError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuthError {
    /// True for failures the user can retry without starting a new attempt.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AuthError::Exchange(_))
    }
}
