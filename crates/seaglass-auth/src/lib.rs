//! zkLogin-style decentralized login for the Seaglass dashboard.
//!
//! The flow binds an OAuth identity-token round-trip to an ephemeral
//! keypair: a single-use nonce derived from the key, an expiry epoch, and
//! client-secret randomness is embedded in the authorization request and
//! must reappear unchanged in the returned token before any claim is
//! trusted. Verified claims then map to a deterministic wallet address,
//! locally or through the backend exchange service.
//!
//! Browser side effects (navigation, URL scrubbing, attempt persistence
//! across the redirect) sit behind the [`PageLocation`] and [`AttemptStore`]
//! traits; `seaglass-wasm` provides the web implementations.

pub mod attempt;
pub mod callback;
pub mod config;
pub mod epoch;
pub mod error;
pub mod flow;
pub mod fragment;
pub mod location;
pub mod oauth;
pub mod resolver;
pub mod session;
pub mod token;

pub use attempt::{AttemptStore, LoginAttempt, MemoryAttemptStore, StoredAttempt, EPOCH_VALIDITY_MARGIN};
pub use callback::process_callback;
pub use config::AuthConfig;
pub use epoch::{EpochSource, FullnodeEpochSource};
pub use error::AuthError;
pub use flow::LoginFlow;
pub use fragment::{extract_id_token, parse_fragment};
pub use location::{MemoryLocation, PageLocation};
pub use oauth::{authorization_url, redirect_to_provider};
pub use resolver::{AddressResolver, DelegatedResolver, LocalResolver, ResolvedWallet};
pub use session::{shorten_address, Session, SessionStore};
pub use token::{decode_id_token, IdTokenClaims, VerifiedToken};
