//! Page location capability.
//!
//! The OAuth redirect and the URL scrub on logout are browser side effects.
//! They sit behind this trait so the flow is testable without a browser; the
//! wasm crate implements it over `window.location` and `history.replaceState`.

/// The visible page URL and navigation controls.
pub trait PageLocation {
    /// The current URL fragment (without the leading `#`), if any.
    fn fragment(&self) -> Option<String>;

    /// Remove the fragment from the visible URL without reloading, so a
    /// reload cannot re-trigger callback processing with a stale token.
    fn clear_fragment(&mut self);

    /// Navigate away to `url`. Control does not return to the caller in the
    /// same execution context: all in-memory state is lost and the flow
    /// resumes from a fresh page load at the redirect URI.
    fn assign(&mut self, url: &str);
}

/// In-memory location for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryLocation {
    fragment: Option<String>,
    /// Last URL passed to `assign`, for assertions.
    pub navigated_to: Option<String>,
}

impl MemoryLocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate arriving on a page whose URL carries `fragment`.
    pub fn with_fragment(fragment: impl Into<String>) -> Self {
        Self {
            fragment: Some(fragment.into()),
            navigated_to: None,
        }
    }
}

impl PageLocation for MemoryLocation {
    fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    fn clear_fragment(&mut self) {
        self.fragment = None;
    }

    fn assign(&mut self, url: &str) {
        self.navigated_to = Some(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_location_has_no_fragment() {
        assert!(MemoryLocation::new().fragment().is_none());
    }

    #[test]
    fn with_fragment_round_trips() {
        let location = MemoryLocation::with_fragment("id_token=abc");
        assert_eq!(location.fragment().as_deref(), Some("id_token=abc"));
    }

    #[test]
    fn clear_fragment_scrubs_url() {
        let mut location = MemoryLocation::with_fragment("id_token=abc");
        location.clear_fragment();
        assert!(location.fragment().is_none());
    }

    #[test]
    fn assign_records_navigation() {
        let mut location = MemoryLocation::new();
        location.assign("https://accounts.google.com/o/oauth2/v2/auth?x=1");
        assert!(location.navigated_to.unwrap().starts_with("https://accounts"));
    }
}
