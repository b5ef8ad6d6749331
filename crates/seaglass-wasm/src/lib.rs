//! WASM bindings for the Seaglass login flow.
//!
//! Exposes the login state machine to TypeScript browser code and supplies
//! the browser-backed capabilities: `window.location` navigation, history
//! rewriting for URL scrubbing, and sessionStorage persistence of the
//! in-flight attempt across the OAuth redirect.

pub mod auth;
pub mod browser;
mod error;
