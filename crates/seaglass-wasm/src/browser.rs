//! Browser implementations of the flow's platform capabilities.

use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

use seaglass_auth::{AttemptStore, AuthError, PageLocation, StoredAttempt};

/// sessionStorage key for the in-flight attempt. Session-scoped on purpose:
/// the record must survive the same-tab redirect to the provider and back,
/// and should die with the tab.
const ATTEMPT_STORAGE_KEY: &str = "seaglass:login-attempt:v1";

fn window() -> Result<Window, AuthError> {
    web_sys::window().ok_or_else(|| AuthError::AttemptCreation("no window object".into()))
}

/// `window.location` + `history.replaceState` as a [`PageLocation`].
pub struct BrowserLocation {
    window: Window,
}

impl BrowserLocation {
    pub fn new() -> Result<Self, AuthError> {
        Ok(Self { window: window()? })
    }
}

impl PageLocation for BrowserLocation {
    fn fragment(&self) -> Option<String> {
        let hash = self.window.location().hash().ok()?;
        let fragment = hash.strip_prefix('#').unwrap_or(&hash);
        if fragment.is_empty() {
            None
        } else {
            Some(fragment.to_string())
        }
    }

    fn clear_fragment(&mut self) {
        let location = self.window.location();
        let (Ok(origin), Ok(pathname)) = (location.origin(), location.pathname()) else {
            return;
        };
        let clean_url = format!("{origin}{pathname}");
        if let Ok(history) = self.window.history() {
            // replaceState rewrites the visible URL without a reload, so a
            // refresh cannot re-submit the consumed token
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&clean_url));
        }
    }

    fn assign(&mut self, url: &str) {
        let _ = self.window.location().assign(url);
    }
}

/// sessionStorage-backed [`AttemptStore`].
pub struct SessionStorageAttemptStore {
    storage: Storage,
}

impl SessionStorageAttemptStore {
    pub fn new() -> Result<Self, AuthError> {
        let storage = window()?
            .session_storage()
            .map_err(|_| AuthError::AttemptCreation("sessionStorage blocked".into()))?
            .ok_or_else(|| AuthError::AttemptCreation("sessionStorage unavailable".into()))?;
        Ok(Self { storage })
    }
}

impl AttemptStore for SessionStorageAttemptStore {
    fn save(&self, attempt: &StoredAttempt) -> Result<(), AuthError> {
        let json = serde_json::to_string(attempt)?;
        self.storage
            .set_item(ATTEMPT_STORAGE_KEY, &json)
            .map_err(|_| AuthError::AttemptCreation("could not persist login attempt".into()))
    }

    fn load(&self) -> Result<Option<StoredAttempt>, AuthError> {
        let json = self
            .storage
            .get_item(ATTEMPT_STORAGE_KEY)
            .map_err(|_| AuthError::CorruptAttempt("sessionStorage read failed".into()))?;
        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn clear(&self) -> Result<(), AuthError> {
        let _ = self.storage.remove_item(ATTEMPT_STORAGE_KEY);
        Ok(())
    }
}
