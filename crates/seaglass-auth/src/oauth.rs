//! Authorization request construction for the implicit flow.

use url::Url;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::location::PageLocation;

/// Scopes requested from the provider. `email` is needed for the delegated
/// store call; the provider omits the claim without it.
const OAUTH_SCOPE: &str = "openid email";

/// Build the provider authorization URL for one login attempt.
///
/// Parameter names and values follow the OpenID implicit flow: the token
/// comes back in the redirect fragment (`response_type=id_token`) with the
/// attempt's nonce embedded for later verification.
pub fn authorization_url(config: &AuthConfig, nonce: &str) -> Result<Url, AuthError> {
    config.validate()?;
    let mut url = Url::parse(&config.provider_url)?;
    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("response_type", "id_token")
        .append_pair("scope", OAUTH_SCOPE)
        .append_pair("nonce", nonce);
    Ok(url)
}

/// Navigate to the provider. This is a navigation boundary, not a normal
/// suspension point: nothing after it runs in this page lifetime.
pub fn redirect_to_provider(
    config: &AuthConfig,
    nonce: &str,
    location: &mut dyn PageLocation,
) -> Result<(), AuthError> {
    let url = authorization_url(config, nonce)?;
    tracing::debug!(provider = %config.provider_url, "redirecting to identity provider");
    location.assign(url.as_str());
    Ok(())
}
