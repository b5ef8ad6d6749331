//! Environment-supplied configuration for the login flow.

use crate::error::AuthError;

/// Default OpenID provider authorization endpoint.
pub const DEFAULT_PROVIDER_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Default fullnode used to fetch the current network epoch.
pub const DEFAULT_FULLNODE_URL: &str = "https://fullnode.devnet.sui.io";

/// Configuration consumed by the login flow.
///
/// Values are treated as opaque: only presence is validated here. A missing
/// `backend_url` selects local address derivation instead of the delegated
/// backend exchange.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// OAuth client id registered with the OpenID provider.
    pub client_id: String,
    /// Redirect URI the provider sends the identity token back to.
    pub redirect_uri: String,
    /// Authorization endpoint of the OpenID provider.
    pub provider_url: String,
    /// Fullnode RPC endpoint for the current-epoch fetch.
    pub fullnode_url: String,
    /// Base URL of the backend auth exchange service, if delegated.
    pub backend_url: Option<String>,
}

impl AuthConfig {
    /// Build a config with provider and fullnode defaults.
    pub fn new(client_id: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            fullnode_url: DEFAULT_FULLNODE_URL.to_string(),
            backend_url: None,
        }
    }

    /// Load configuration from the environment.
    ///
    /// `SEAGLASS_CLIENT_ID` and `SEAGLASS_REDIRECT_URI` are required;
    /// `SEAGLASS_PROVIDER_URL`, `SEAGLASS_FULLNODE_URL`, and
    /// `SEAGLASS_BACKEND_URL` override the defaults.
    pub fn from_env() -> Result<Self, AuthError> {
        let client_id = std::env::var("SEAGLASS_CLIENT_ID")
            .map_err(|_| AuthError::MissingConfig("SEAGLASS_CLIENT_ID"))?;
        let redirect_uri = std::env::var("SEAGLASS_REDIRECT_URI")
            .map_err(|_| AuthError::MissingConfig("SEAGLASS_REDIRECT_URI"))?;

        let mut config = Self::new(client_id, redirect_uri);
        if let Ok(provider_url) = std::env::var("SEAGLASS_PROVIDER_URL") {
            config.provider_url = provider_url;
        }
        if let Ok(fullnode_url) = std::env::var("SEAGLASS_FULLNODE_URL") {
            config.fullnode_url = fullnode_url;
        }
        if let Ok(backend_url) = std::env::var("SEAGLASS_BACKEND_URL") {
            config.backend_url = Some(backend_url);
        }
        Ok(config)
    }

    /// Ensure the required values are present (non-empty).
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.client_id.is_empty() {
            return Err(AuthError::MissingConfig("client_id"));
        }
        if self.redirect_uri.is_empty() {
            return Err(AuthError::MissingConfig("redirect_uri"));
        }
        Ok(())
    }
}
