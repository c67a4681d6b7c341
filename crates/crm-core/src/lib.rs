//! Core library for the CRM client.
//!
//! The heart of the crate is [`api::ApiClient`], an authenticated HTTP
//! session for the CRM REST backend. It attaches the stored access token to
//! every request as a bearer credential and recovers from exactly one class
//! of failure: an expired access token. On a 401 it exchanges the stored
//! refresh token for a new access token and replays the original request
//! once; any further failure is surfaced to the caller, and unrecoverable
//! renewal failures wipe the stored credentials and notify subscribers so
//! the hosting application can return to its login view.
//!
//! Credential persistence is pluggable through [`auth::TokenStore`], with
//! in-memory, file-backed, and OS-keychain implementations provided.
//!
//! ```no_run
//! use std::sync::Arc;
//! use crm_core::{ApiClient, ApiConfig};
//! use crm_core::auth::FileTokenStore;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Arc::new(FileTokenStore::open_default()?);
//! let client = ApiClient::new(ApiConfig::default(), store)?;
//!
//! let _session = client.subscribe();
//!
//! client.login("harman@local.dev", "hunter2").await?;
//! let leads = client.list_leads(&Default::default()).await?;
//! println!("{} leads", leads.count);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{SessionState, TokenStore};
pub use config::ApiConfig;
