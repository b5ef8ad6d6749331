//! Login flow orchestration.
//!
//! Ties the pieces together across the navigation boundary:
//!
//! ```text
//! begin_login: attempt created → persisted → redirect to provider
//!              (page unloads; nothing below runs in this lifetime)
//! resume:      fragment parsed → attempt rehydrated → nonce verified
//!              → address resolved → session installed
//! ```
//!
//! `resume` runs on every page load. The common case — no callback
//! parameters present — is the silent default state, not an error the user
//! sees.

use crate::attempt::{AttemptStore, LoginAttempt};
use crate::callback::process_callback;
use crate::config::AuthConfig;
use crate::epoch::EpochSource;
use crate::error::AuthError;
use crate::location::PageLocation;
use crate::oauth::redirect_to_provider;
use crate::resolver::AddressResolver;
use crate::session::{Session, SessionStore};

/// Orchestrates one browser context's login lifecycle.
pub struct LoginFlow<S: AttemptStore, L: PageLocation> {
    config: AuthConfig,
    attempts: S,
    location: L,
    sessions: SessionStore,
}

impl<S: AttemptStore, L: PageLocation> LoginFlow<S, L> {
    pub fn new(config: AuthConfig, attempts: S, location: L) -> Self {
        Self {
            config,
            attempts,
            location,
            sessions: SessionStore::new(),
        }
    }

    /// Start a login attempt: generate the ephemeral keypair and nonce,
    /// persist the attempt for the callback, and navigate to the provider.
    ///
    /// An epoch fetch failure surfaces as `AttemptCreation` and persists
    /// nothing. On success this call does not return control in any useful
    /// sense — the navigation unloads the page.
    pub async fn begin_login(&mut self, epochs: &dyn EpochSource) -> Result<(), AuthError> {
        self.config.validate()?;
        let attempt = LoginAttempt::create(epochs).await?;
        self.attempts.save(&attempt.to_stored())?;
        redirect_to_provider(&self.config, &attempt.nonce, &mut self.location)
    }

    /// Resume after a page load, completing the flow if this is a callback.
    ///
    /// Returns `Ok(None)` when no identity token is present (the silent
    /// default on every ordinary page load). Otherwise verifies the token
    /// against the persisted attempt, resolves the wallet address, and
    /// installs the session — all-or-nothing.
    ///
    /// Attempt lifecycle on failure: recoverable `Exchange` errors leave the
    /// attempt and fragment in place so the same callback can be retried;
    /// terminal failures (`InvalidToken`, `NonceMismatch`, `Rejected`)
    /// consume the attempt and scrub the token from the URL.
    pub async fn resume(
        &mut self,
        resolver: &dyn AddressResolver,
    ) -> Result<Option<Session>, AuthError> {
        let fragment = match self.location.fragment() {
            Some(fragment) => fragment,
            None => return Ok(None),
        };
        if crate::fragment::extract_id_token(&fragment).is_none() {
            return Ok(None);
        }

        let stored = match self.attempts.load()? {
            Some(stored) => stored,
            None => {
                // A token arrived with no in-flight attempt: stale reload or
                // foreign redirect. Nothing to verify against, so reject.
                tracing::warn!("callback token with no persisted login attempt");
                self.location.clear_fragment();
                return Err(AuthError::NonceMismatch);
            }
        };
        let attempt = match LoginAttempt::from_stored(&stored) {
            Ok(attempt) => attempt,
            Err(e) => {
                self.attempts.clear()?;
                self.location.clear_fragment();
                return Err(e);
            }
        };

        let verified = match process_callback(&fragment, &attempt) {
            Ok(verified) => verified,
            Err(e) => {
                self.attempts.clear()?;
                self.location.clear_fragment();
                return Err(e);
            }
        };

        let wallet = match resolver.resolve(&verified).await {
            Ok(wallet) => wallet,
            Err(e) if e.is_recoverable() => {
                tracing::warn!(error = %e, "exchange failed; attempt kept for retry");
                return Err(e);
            }
            Err(e) => {
                self.attempts.clear()?;
                self.location.clear_fragment();
                return Err(e);
            }
        };

        let session = Session::new(wallet.address, wallet.session_token);
        self.sessions.set(session.clone());
        self.attempts.clear()?;
        self.location.clear_fragment();
        tracing::debug!(address = %session.address, "login complete");
        Ok(Some(session))
    }

    /// Log out: drop the session and strip any identity-token fragment from
    /// the visible URL so a reload cannot replay the callback.
    pub fn logout(&mut self) {
        self.sessions.clear();
        self.location.clear_fragment();
        tracing::debug!("session cleared");
    }

    pub fn session(&self) -> Option<&Session> {
        self.sessions.get()
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn location(&self) -> &L {
        &self.location
    }
}
