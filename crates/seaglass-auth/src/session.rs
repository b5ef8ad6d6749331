//! Browser-session state for the logged-in wallet.

use chrono::{DateTime, Utc};

/// An authenticated session: the derived wallet address plus the backend
/// session token when the delegated exchange produced one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub address: String,
    pub application_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(address: impl Into<String>, application_token: Option<String>) -> Self {
        Self {
            address: address.into(),
            application_token,
            created_at: Utc::now(),
        }
    }
}

/// Holds at most one active session per browser context.
///
/// Setting a new session atomically replaces any prior one; there is no
/// partially-populated state. URL scrubbing on logout is the flow's
/// responsibility, since it needs the page location.
#[derive(Debug, Default)]
pub struct SessionStore {
    session: Option<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a session, replacing any existing one.
    pub fn set(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Drop the active session, if any.
    pub fn clear(&mut self) {
        self.session = None;
    }

    pub fn get(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }
}

/// Shorten an address for display: first 6 and last 4 characters.
///
/// Counts characters, not bytes: the wasm export hands this arbitrary JS
/// strings, so byte slicing could split a multi-byte character.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
