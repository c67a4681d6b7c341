//! Authenticated HTTP client for the CRM REST API.
//!
//! Every request carries the stored access token as a bearer credential. A
//! 401 response triggers exactly one token renewal and one replay of the
//! original request; any further failure is surfaced to the caller. Terminal
//! renewal failures wipe the stored credentials and publish a session
//! termination that the hosting application can subscribe to.

use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use crate::auth::{
    SessionState, SessionWatch, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY,
};
use crate::config::{ApiConfig, LOGIN_PATH, PROFILE_PATH, REGISTER_PATH, TOKEN_REFRESH_PATH};
use crate::models::User;

use super::{ApiError, ApiRequest, Attempt};

/// Access/refresh token pair returned by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Deserialize)]
struct RenewalResponse {
    access: String,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Payload for the registration endpoint. `password2` is the confirmation
/// the backend validates against `password`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterBody {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

/// API client for the CRM backend.
/// Clone is cheap - all state lives behind an Arc.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: Client,
    config: ApiConfig,
    store: Arc<dyn TokenStore>,
    /// Serializes token renewals so concurrent 401 handlers share one
    /// renewal instead of racing to overwrite the stored access token.
    renewal: Mutex<()>,
    session: watch::Sender<SessionState>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        let initial = if store.get(ACCESS_TOKEN_KEY).is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        };
        let (session, _) = watch::channel(initial);
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                config,
                store,
                renewal: Mutex::new(()),
                session,
            }),
        })
    }

    /// Subscribe to session transitions. Receivers observe `Unauthenticated`
    /// when the client wipes credentials, so the hosting application can
    /// switch to its login view.
    pub fn subscribe(&self) -> SessionWatch {
        self.inner.session.subscribe()
    }

    /// Whether an access token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.inner.store.get(ACCESS_TOKEN_KEY).is_some()
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Send a request, attaching the stored access token as a bearer
    /// credential.
    ///
    /// Any status other than 401 is returned unchanged, with no storage
    /// mutation. A 401 on a first-attempt request triggers one token renewal
    /// and one replay; a 401 on the replay is returned as-is. Network errors
    /// propagate immediately and never trigger renewal.
    pub async fn dispatch(&self, request: ApiRequest) -> Result<Response, ApiError> {
        let mut attempt = Attempt::First;
        let mut token = self.inner.store.get(ACCESS_TOKEN_KEY);

        loop {
            let response = self.send(&request, token.as_deref()).await?;

            if response.status() != StatusCode::UNAUTHORIZED || attempt == Attempt::Retried {
                return Ok(response);
            }

            debug!(path = %request.path, "Access token rejected, renewing");
            token = Some(self.renew(token.as_deref()).await?);
            attempt = Attempt::Retried;
        }
    }

    /// Build and send one attempt of `request`.
    async fn send(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<Response, ApiError> {
        let url = self.inner.config.url(&request.path);
        let mut builder = self.inner.http.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder.send().await?)
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Renewals are serialized: the first 401 handler performs the exchange
    /// while later ones wait on the lock, then reuse the token it stored
    /// rather than issuing their own renewal call. Any renewal failure is
    /// terminal: credentials are wiped, the logout signal fires, and the
    /// renewal's own error is returned.
    async fn renew(&self, stale: Option<&str>) -> Result<String, ApiError> {
        let _guard = self.inner.renewal.lock().await;

        // A concurrent renewal may have finished while we waited on the lock.
        if let Some(current) = self.inner.store.get(ACCESS_TOKEN_KEY) {
            if stale != Some(current.as_str()) {
                debug!("Reusing access token from concurrent renewal");
                return Ok(current);
            }
        }

        let Some(refresh) = self.inner.store.get(REFRESH_TOKEN_KEY) else {
            warn!("401 with no refresh token stored, terminating session");
            self.clear_session();
            return Err(ApiError::Unauthorized);
        };

        let url = self.inner.config.url(TOKEN_REFRESH_PATH);
        let result = self
            .inner
            .http
            .post(&url)
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Token renewal request failed, terminating session");
                self.clear_session();
                return Err(e.into());
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Token renewal rejected, terminating session");
            self.clear_session();
            return Err(ApiError::from_status(status, &body));
        }

        let renewed: RenewalResponse = match response.json().await {
            Ok(renewed) => renewed,
            Err(e) => {
                warn!(error = %e, "Malformed renewal response, terminating session");
                self.clear_session();
                return Err(ApiError::InvalidResponse(format!("token renewal: {e}")));
            }
        };

        self.inner.store.set(ACCESS_TOKEN_KEY, &renewed.access);
        debug!("Access token renewed");
        Ok(renewed.access)
    }

    /// Wipe stored credentials and signal the hosting application.
    /// Idempotent; subscribers are notified once per transition.
    pub fn clear_session(&self) {
        self.inner.store.remove(ACCESS_TOKEN_KEY);
        self.inner.store.remove(REFRESH_TOKEN_KEY);
        self.set_state(SessionState::Unauthenticated);
    }

    fn set_state(&self, state: SessionState) {
        self.inner.session.send_if_modified(|current| {
            if *current != state {
                *current = state;
                true
            } else {
                false
            }
        });
    }

    // ========================================================================
    // Auth endpoints
    // ========================================================================

    /// Authenticate and persist the returned token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError> {
        let url = self.inner.config.url(LOGIN_PATH);
        let response = self
            .inner
            .http
            .post(&url)
            .json(&LoginBody { email, password })
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        let tokens: TokenPair = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("login response: {e}")))?;

        self.inner.store.set(ACCESS_TOKEN_KEY, &tokens.access);
        self.inner.store.set(REFRESH_TOKEN_KEY, &tokens.refresh);
        self.set_state(SessionState::Authenticated);
        debug!("Login succeeded, tokens stored");
        Ok(tokens)
    }

    /// Create an account. The backend does not log the new user in; callers
    /// follow up with `login`.
    pub async fn register(&self, body: &RegisterBody) -> Result<User, ApiError> {
        let url = self.inner.config.url(REGISTER_PATH);
        let response = self.inner.http.post(&url).json(body).send().await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("register response: {e}")))
    }

    /// Fetch the current user's profile.
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.get(PROFILE_PATH).await
    }

    /// Drop the session: wipe tokens and signal subscribers.
    pub fn logout(&self) {
        debug!("Logging out");
        self.clear_session();
    }

    // ========================================================================
    // Typed helpers
    // ========================================================================

    /// Dispatch `request` and deserialize a 2xx response body, mapping any
    /// other status to an `ApiError`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let path = request.path.clone();
        let response = self.dispatch(request).await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("{path}: {e}")))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.fetch(ApiRequest::get(path)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.fetch(ApiRequest::post(path).json(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.fetch(ApiRequest::patch(path).json(body)).await
    }

    /// POST where the caller does not care about the response body.
    pub async fn post_empty<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let body = serde_json::to_value(body)?;
        let response = self.dispatch(ApiRequest::post(path).json(body)).await?;
        Self::check_response(response).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.dispatch(ApiRequest::delete(path)).await?;
        Self::check_response(response).await?;
        Ok(())
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}
