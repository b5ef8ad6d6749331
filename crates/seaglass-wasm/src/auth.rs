//! WASM exports for the login flow.
//!
//! The flow object is rebuilt per call from the supplied config; the only
//! state crossing the OAuth navigation lives in sessionStorage (the
//! attempt) and in the caller's own state (the session).

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use seaglass_auth::{
    shorten_address, AddressResolver, AuthConfig, AuthError, DelegatedResolver,
    FullnodeEpochSource, LocalResolver, LoginFlow,
};
use seaglass_crypto::derive_address_from_nonce;

use crate::browser::{BrowserLocation, SessionStorageAttemptStore};
use crate::error::{to_js_error, to_js_value};

/// Config object passed from TypeScript.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsAuthConfig {
    client_id: String,
    redirect_uri: String,
    provider_url: Option<String>,
    fullnode_url: Option<String>,
    backend_url: Option<String>,
}

impl JsAuthConfig {
    fn into_config(self) -> AuthConfig {
        let mut config = AuthConfig::new(self.client_id, self.redirect_uri);
        if let Some(provider_url) = self.provider_url {
            config.provider_url = provider_url;
        }
        if let Some(fullnode_url) = self.fullnode_url {
            config.fullnode_url = fullnode_url;
        }
        config.backend_url = self.backend_url;
        config
    }
}

/// Session shape returned to TypeScript.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsSession {
    address: String,
    short_address: String,
    application_token: Option<String>,
    created_at: String,
}

fn build_flow(
    config: AuthConfig,
) -> Result<LoginFlow<SessionStorageAttemptStore, BrowserLocation>, AuthError> {
    let attempts = SessionStorageAttemptStore::new()?;
    let location = BrowserLocation::new()?;
    Ok(LoginFlow::new(config, attempts, location))
}

fn parse_config(config: JsValue) -> Result<AuthConfig, JsValue> {
    let config: JsAuthConfig = serde_wasm_bindgen::from_value(config).map_err(to_js_error)?;
    Ok(config.into_config())
}

/// Start a login attempt and redirect to the identity provider.
///
/// Resolves just before the page navigates away; rejects if the epoch
/// fetch fails or the attempt cannot be persisted.
#[wasm_bindgen(js_name = "beginLogin")]
pub async fn wasm_begin_login(config: JsValue) -> Result<(), JsValue> {
    let config = parse_config(config)?;
    let epochs = FullnodeEpochSource::new(config.fullnode_url.clone());
    let mut flow = build_flow(config).map_err(to_js_error)?;
    flow.begin_login(&epochs).await.map_err(to_js_error)
}

/// Complete the flow on page load.
///
/// Returns the session object on a successful callback, `null` when the
/// load is not a callback, and rejects on verification or exchange errors.
#[wasm_bindgen(js_name = "completeLogin")]
pub async fn wasm_complete_login(config: JsValue) -> Result<JsValue, JsValue> {
    let config = parse_config(config)?;
    let resolver: Box<dyn AddressResolver> = match &config.backend_url {
        Some(backend_url) => Box::new(DelegatedResolver::new(backend_url.clone())),
        None => Box::new(LocalResolver),
    };
    let mut flow = build_flow(config).map_err(to_js_error)?;

    match flow.resume(resolver.as_ref()).await.map_err(to_js_error)? {
        Some(session) => to_js_value(&JsSession {
            short_address: shorten_address(&session.address),
            address: session.address,
            application_token: session.application_token,
            created_at: session.created_at.to_rfc3339(),
        }),
        None => Ok(JsValue::NULL),
    }
}

/// Log out: drops any session state held here and strips the identity-token
/// fragment from the visible URL.
#[wasm_bindgen(js_name = "logout")]
pub fn wasm_logout(config: JsValue) -> Result<(), JsValue> {
    let config = parse_config(config)?;
    let mut flow = build_flow(config).map_err(to_js_error)?;
    flow.logout();
    Ok(())
}

/// Deterministic local address derivation from a verified nonce claim.
#[wasm_bindgen(js_name = "deriveAddressFromNonce")]
pub fn wasm_derive_address_from_nonce(nonce: &str) -> Result<String, JsValue> {
    derive_address_from_nonce(nonce).map_err(to_js_error)
}

/// Shorten an address for display (first 6 and last 4 characters).
#[wasm_bindgen(js_name = "shortenAddress")]
pub fn wasm_shorten_address(address: &str) -> String {
    shorten_address(address)
}
