//! Session state and credential storage.
//!
//! This module provides:
//! - `SessionState`: the process-wide login state published by the client
//! - `TokenStore`: the storage capability the client reads tokens from,
//!   with in-memory, file-backed, and OS-keychain implementations
//!
//! Only the session client writes tokens (on login, renewal success, and
//! logout); any component may read them.

pub mod session;
pub mod store;

pub use session::{SessionState, SessionWatch};
pub use store::{
    FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore, ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY,
};
