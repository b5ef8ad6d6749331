//! Address resolution strategies.
//!
//! Once the callback token is verified, its claims map to a wallet address
//! either locally (seeded keypair derivation from the nonce claim) or by
//! delegating to the backend auth exchange service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use seaglass_crypto::derive_address_from_nonce;

use crate::error::AuthError;
use crate::token::VerifiedToken;

const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(15);

/// Build a reqwest client with a request timeout.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    // ClientBuilder::build only fails on TLS backend misconfiguration
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

/// On wasm the browser's fetch owns timeout behavior.
#[cfg(target_arch = "wasm32")]
pub(crate) fn http_client(_timeout: Duration) -> reqwest::Client {
    reqwest::Client::new()
}

/// A wallet bound to a verified identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWallet {
    /// Canonical wallet address.
    pub address: String,
    /// Application session token, present only in delegated mode.
    pub session_token: Option<String>,
}

/// Capability turning a verified identity token into a wallet address.
#[async_trait(?Send)]
pub trait AddressResolver {
    async fn resolve(&self, token: &VerifiedToken) -> Result<ResolvedWallet, AuthError>;
}

/// Local derivation: seed a keypair from the hash of the verified nonce
/// claim and take its canonical address.
///
/// Deterministic and offline, but the binding is only as strong as the
/// nonce verification that produced the `VerifiedToken`; production
/// deployments should prefer `DelegatedResolver`, which has the backend
/// verify the provider's signature.
#[derive(Debug, Default)]
pub struct LocalResolver;

#[async_trait(?Send)]
impl AddressResolver for LocalResolver {
    async fn resolve(&self, token: &VerifiedToken) -> Result<ResolvedWallet, AuthError> {
        let nonce = token
            .claims
            .nonce
            .as_deref()
            .ok_or(AuthError::NonceMismatch)?;
        let address = derive_address_from_nonce(nonce)?;
        Ok(ResolvedWallet {
            address,
            session_token: None,
        })
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    jwt_token: String,
}

#[derive(Serialize)]
struct StoreRequest<'a> {
    id_token: &'a str,
    email: &'a str,
}

#[derive(Deserialize)]
struct StoreResponse {
    wallet: String,
}

/// Delegated derivation through the backend auth exchange service.
///
/// Two calls: `POST /user/auth/login` exchanges the identity token for an
/// application session token, then `POST /user/auth/store` (Bearer-authorized)
/// returns the wallet address bound to the identity. The backend keys the
/// mapping by the token's subject, so resubmitting the same token is
/// idempotent and the client never retries blindly.
#[derive(Debug, Clone)]
pub struct DelegatedResolver {
    base_url: String,
    client: reqwest::Client,
}

impl DelegatedResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: http_client(EXCHANGE_TIMEOUT),
        }
    }

    async fn login(&self, id_token: &str) -> Result<String, AuthError> {
        let response = self
            .client
            .post(format!("{}/user/auth/login", self.base_url))
            .json(&LoginRequest { id_token })
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response)?;
        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Exchange(format!("login response: {e}")))?;
        Ok(body.jwt_token)
    }

    async fn store(&self, id_token: &str, email: &str, jwt: &str) -> Result<String, AuthError> {
        let response = self
            .client
            .post(format!("{}/user/auth/store", self.base_url))
            .bearer_auth(jwt)
            .json(&StoreRequest { id_token, email })
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response)?;
        let body: StoreResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Exchange(format!("store response: {e}")))?;
        Ok(body.wallet)
    }
}

#[async_trait(?Send)]
impl AddressResolver for DelegatedResolver {
    async fn resolve(&self, token: &VerifiedToken) -> Result<ResolvedWallet, AuthError> {
        let jwt = self.login(&token.raw).await?;
        let wallet = self.store(&token.raw, token.claims.identity()?, &jwt).await?;

        tracing::debug!("backend exchange returned wallet mapping");
        Ok(ResolvedWallet {
            address: wallet,
            session_token: Some(jwt),
        })
    }
}

/// Network-level failures are recoverable; the user may retry the exchange.
fn map_transport_error(e: reqwest::Error) -> AuthError {
    AuthError::Exchange(e.to_string())
}

/// 4xx means the backend examined and rejected the token (terminal); 5xx is
/// a backend fault the user may retry.
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    let status = response.status();
    if status.is_client_error() {
        Err(AuthError::Rejected(format!("HTTP {status}")))
    } else if status.is_server_error() {
        Err(AuthError::Exchange(format!("HTTP {status}")))
    } else {
        Ok(response)
    }
}
