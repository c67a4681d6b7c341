//! Process-wide session state.
//!
//! The API client publishes transitions on a watch channel instead of
//! performing any navigation itself; the hosting application subscribes via
//! `ApiClient::subscribe` and reacts however fits its shell (a UI would
//! typically switch to its login view on `Unauthenticated`).

use tokio::sync::watch;

/// Login state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// An access token is stored; requests go out with a bearer credential.
    Authenticated,
    /// No credentials are stored. Reached on logout or on an unrecoverable
    /// renewal failure.
    Unauthenticated,
}

/// Receiver half of the session-termination signal.
pub type SessionWatch = watch::Receiver<SessionState>;
