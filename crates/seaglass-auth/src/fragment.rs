//! Implicit-flow callback fragment parsing.
//!
//! The provider returns the identity token in the URL *fragment*, not the
//! query string, so it never reaches the server. Parsing is a pure function
//! over the fragment string and needs no browser.

/// Parse a URL fragment into key/value pairs.
///
/// Accepts the fragment with or without its leading `#`. Values are
/// percent-decoded; pairs without a value decode to an empty string.
pub fn parse_fragment(fragment: &str) -> Vec<(String, String)> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    url::form_urlencoded::parse(fragment.as_bytes())
        .into_owned()
        .collect()
}

/// Extract the `id_token` parameter from a callback fragment, if present.
pub fn extract_id_token(fragment: &str) -> Option<String> {
    parse_fragment(fragment)
        .into_iter()
        .find(|(key, value)| key == "id_token" && !value.is_empty())
        .map(|(_, value)| value)
}
