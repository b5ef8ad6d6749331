//! Current-epoch lookup for bounding ephemeral key validity.
//!
//! The login flow needs the network's current epoch to compute the expiry
//! window of the ephemeral key. Fetching it is a boundary call behind the
//! `EpochSource` trait so tests can supply a fixed epoch.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::error::AuthError;

const EPOCH_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of the current network epoch.
#[async_trait(?Send)]
pub trait EpochSource {
    /// Fetch the current epoch number.
    ///
    /// A failure here is fatal to starting a login attempt: a stale epoch
    /// risks a nonce validity mismatch at verification time, so the flow
    /// never falls back to a cached value.
    async fn current_epoch(&self) -> Result<u64, AuthError>;
}

/// Epoch source backed by a fullnode's JSON-RPC system-state endpoint.
#[derive(Debug, Clone)]
pub struct FullnodeEpochSource {
    url: String,
    client: reqwest::Client,
}

impl FullnodeEpochSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: crate::resolver::http_client(EPOCH_REQUEST_TIMEOUT),
        }
    }
}

#[async_trait(?Send)]
impl EpochSource for FullnodeEpochSource {
    async fn current_epoch(&self) -> Result<u64, AuthError> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "suix_getLatestSuiSystemState",
            "params": [],
        });

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AuthError::AttemptCreation(format!("epoch fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| AuthError::AttemptCreation(format!("epoch fetch failed: {e}")))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AuthError::AttemptCreation(format!("epoch response: {e}")))?;
        parse_epoch_response(&body)
    }
}

/// Extract the epoch number from a `suix_getLatestSuiSystemState` response.
///
/// The fullnode returns the epoch as a decimal string inside `result`.
pub fn parse_epoch_response(body: &serde_json::Value) -> Result<u64, AuthError> {
    let epoch = body
        .get("result")
        .and_then(|r| r.get("epoch"))
        .and_then(|e| e.as_str())
        .ok_or_else(|| AuthError::AttemptCreation("epoch missing from system state".into()))?;

    epoch
        .parse::<u64>()
        .map_err(|e| AuthError::AttemptCreation(format!("epoch not a number: {e}")))
}
