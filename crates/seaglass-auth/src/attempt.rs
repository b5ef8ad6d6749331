//! Login attempt lifecycle.
//!
//! A `LoginAttempt` is created per login click, carried through the flow as
//! an explicit value (never ambient state), and destroyed when the attempt
//! completes. Because the OAuth redirect is a full-page navigation, the
//! attempt must be serialized into a scoped store before navigating and
//! rehydrated on callback; otherwise the returned nonce cannot be verified
//! against anything.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;

use seaglass_crypto::{
    base64url_decode, base64url_encode, compute_nonce, generate_randomness, EphemeralKeypair,
};

use crate::epoch::EpochSource;
use crate::error::AuthError;

/// How many epochs past the current one the ephemeral key stays valid.
pub const EPOCH_VALIDITY_MARGIN: u64 = 2;

/// State of one in-flight login attempt.
#[derive(Debug)]
pub struct LoginAttempt {
    pub ephemeral: EphemeralKeypair,
    pub randomness: String,
    pub max_epoch: u64,
    pub nonce: String,
}

impl LoginAttempt {
    /// Create a fresh attempt: new keypair, new randomness, expiry bound to
    /// the current network epoch plus the validity margin.
    ///
    /// Fails with `AttemptCreation` if the epoch cannot be fetched; the flow
    /// never proceeds with a stale epoch.
    pub async fn create(epochs: &dyn EpochSource) -> Result<Self, AuthError> {
        let current_epoch = epochs.current_epoch().await?;
        let max_epoch = current_epoch + EPOCH_VALIDITY_MARGIN;

        let ephemeral = EphemeralKeypair::generate()?;
        let randomness = generate_randomness()?;
        let nonce = compute_nonce(&ephemeral.public_key_bytes(), max_epoch, &randomness);

        tracing::debug!(max_epoch, "created login attempt");
        Ok(Self {
            ephemeral,
            randomness,
            max_epoch,
            nonce,
        })
    }

    /// Serialize for the scoped attempt store.
    pub fn to_stored(&self) -> StoredAttempt {
        StoredAttempt {
            seed: base64url_encode(&self.ephemeral.seed_bytes()),
            randomness: self.randomness.clone(),
            max_epoch: self.max_epoch,
            nonce: self.nonce.clone(),
        }
    }

    /// Rehydrate from the scoped attempt store.
    ///
    /// Recomputes the nonce binding and rejects the record if it does not
    /// hold; a tampered store must not weaken verification.
    pub fn from_stored(stored: &StoredAttempt) -> Result<Self, AuthError> {
        let seed = base64url_decode(&stored.seed)
            .map_err(|e| AuthError::CorruptAttempt(format!("seed: {e}")))?;
        let ephemeral = EphemeralKeypair::from_seed(&seed)?;

        let expected = compute_nonce(
            &ephemeral.public_key_bytes(),
            stored.max_epoch,
            &stored.randomness,
        );
        if expected != stored.nonce {
            return Err(AuthError::CorruptAttempt(
                "nonce binding does not hold".into(),
            ));
        }

        Ok(Self {
            ephemeral,
            randomness: stored.randomness.clone(),
            max_epoch: stored.max_epoch,
            nonce: stored.nonce.clone(),
        })
    }
}

/// Serde form of a login attempt for session-scoped persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAttempt {
    pub seed: String,
    pub randomness: String,
    pub max_epoch: u64,
    pub nonce: String,
}

/// Persistence for the in-flight attempt across the OAuth navigation.
///
/// Implementations should be scoped to the browser tab (session storage):
/// the record must survive the same-tab redirect to the provider and back,
/// and should die with the tab. At most one attempt is stored; saving a new
/// one replaces any previous attempt.
pub trait AttemptStore {
    fn save(&self, attempt: &StoredAttempt) -> Result<(), AuthError>;
    fn load(&self) -> Result<Option<StoredAttempt>, AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

impl<T: AttemptStore + ?Sized> AttemptStore for std::rc::Rc<T> {
    fn save(&self, attempt: &StoredAttempt) -> Result<(), AuthError> {
        (**self).save(attempt)
    }

    fn load(&self) -> Result<Option<StoredAttempt>, AuthError> {
        (**self).load()
    }

    fn clear(&self) -> Result<(), AuthError> {
        (**self).clear()
    }
}

/// In-memory attempt store for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryAttemptStore {
    slot: RefCell<Option<StoredAttempt>>,
}

impl MemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttemptStore for MemoryAttemptStore {
    fn save(&self, attempt: &StoredAttempt) -> Result<(), AuthError> {
        *self.slot.borrow_mut() = Some(attempt.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredAttempt>, AuthError> {
        Ok(self.slot.borrow().clone())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}
