//! Callback processing: token extraction and strict nonce verification.

use crate::attempt::LoginAttempt;
use crate::error::AuthError;
use crate::fragment::extract_id_token;
use crate::token::{decode_id_token, VerifiedToken};

/// Process the provider's callback fragment against the in-flight attempt.
///
/// - No `id_token` in the fragment → `MissingToken`. Every page load runs
///   this check, so the caller treats that case as a silent no-op.
/// - Undecodable token → `InvalidToken`.
/// - Nonce claim absent or different from the attempt's nonce →
///   `NonceMismatch`. A mismatch is treated as a potential forgery or
///   replay and never degraded to acceptance.
///
/// Only this function constructs a `VerifiedToken`; downstream address
/// resolution refuses anything else.
pub fn process_callback(fragment: &str, attempt: &LoginAttempt) -> Result<VerifiedToken, AuthError> {
    let raw = extract_id_token(fragment).ok_or(AuthError::MissingToken)?;
    let claims = decode_id_token(&raw)?;

    match claims.nonce.as_deref() {
        Some(nonce) if nonce == attempt.nonce => {}
        Some(_) => {
            tracing::warn!("callback token nonce does not match in-flight attempt");
            return Err(AuthError::NonceMismatch);
        }
        None => {
            tracing::warn!("callback token carries no nonce claim");
            return Err(AuthError::NonceMismatch);
        }
    }

    Ok(VerifiedToken { raw, claims })
}
