//! REST API client module for the CRM backend.
//!
//! `ApiClient` owns the HTTP session: it attaches the stored bearer
//! credential to every request, renews it transparently on a 401, and
//! exposes typed methods for the lead, client, and organization resources.

pub mod client;
pub mod clients;
pub mod error;
pub mod leads;
pub mod organizations;
pub mod request;

pub use client::{ApiClient, RegisterBody, TokenPair};
pub use error::ApiError;
pub use request::{ApiRequest, Attempt, ListParams};
