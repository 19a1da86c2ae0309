//! Request wrapper: bearer attachment, 401 detection, refresh-and-retry.
//!
//! A request that fails with 401 on its first attempt hands the rejected
//! token to the [`RefreshCoordinator`] and is reissued exactly once with
//! the new token. A second 401 means the session is dead: tear down and
//! fail with `SessionExpired`. Everything else passes straight through.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use genova_kv::SecureStore;

use crate::error::ApiError;
use crate::events::{SessionEvent, Teardown};
use crate::refresh::RefreshCoordinator;
use crate::session::SessionStore;

/// Per-request behaviour flags.
#[derive(Debug, Clone, Copy)]
pub struct RequestOptions {
    /// Attach the stored access token when one exists.
    pub auth: bool,
    /// Never attempt a refresh-and-retry for this request. The refresh
    /// call itself runs with this set, which is what keeps a rejected
    /// refresh from recursing into another refresh.
    pub skip_refresh: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            auth: true,
            skip_refresh: false,
        }
    }
}

impl RequestOptions {
    /// Unauthenticated request — no token, no refresh handling.
    pub fn public() -> Self {
        Self {
            auth: false,
            skip_refresh: true,
        }
    }
}

/// Authenticated HTTP client for the Genova API.
///
/// All methods take `&self`; share one instance behind an `Arc` so every
/// caller goes through the same refresh coordinator.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: SessionStore,
    refresh: Arc<RefreshCoordinator>,
    teardown: Arc<Teardown>,
}

impl ApiClient {
    /// Build a client for `base_url` on top of a secure store.
    pub fn new(base_url: impl Into<String>, store: Arc<dyn SecureStore>) -> Self {
        Self::with_http_client(base_url, store, reqwest::Client::new())
    }

    /// Same as [`ApiClient::new`] with a caller-supplied `reqwest` client
    /// (custom TLS, proxies, test setups).
    pub fn with_http_client(
        base_url: impl Into<String>,
        store: Arc<dyn SecureStore>,
        http: reqwest::Client,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let store = SessionStore::new(store);
        let teardown = Arc::new(Teardown::new(store.clone()));
        let refresh = Arc::new(RefreshCoordinator::new(
            http.clone(),
            base_url.clone(),
            store.clone(),
            Arc::clone(&teardown),
        ));
        Self {
            http,
            base_url,
            store,
            refresh,
            teardown,
        }
    }

    /// Typed session state (tokens, cached profile).
    pub fn session(&self) -> &SessionStore {
        &self.store
    }

    /// Subscribe to session lifecycle events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<SessionEvent> {
        self.teardown.subscribe()
    }

    /// Issue a request and parse the 2xx body as JSON.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        opts: RequestOptions,
    ) -> Result<T, ApiError> {
        let resp = self.execute(method, path, body, opts).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::error_from_response(status, resp).await);
        }
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {e}")))
    }

    /// Issue a request and discard the body (DELETE and friends).
    pub async fn request_no_content(
        &self,
        method: Method,
        path: &str,
        opts: RequestOptions,
    ) -> Result<(), ApiError> {
        let resp = self.execute(method, path, None, opts).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::error_from_response(status, resp).await);
        }
        Ok(())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None, RequestOptions::default())
            .await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, Some(body), RequestOptions::default())
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request_no_content(Method::DELETE, path, RequestOptions::default())
            .await
    }

    /// `GET /health` — server reachability probe, no auth involved.
    pub async fn health(&self) -> Result<(), ApiError> {
        self.request_no_content(Method::GET, "/health", RequestOptions::public())
            .await
    }

    /// Send, and on a first-attempt 401 refresh and retry once.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        opts: RequestOptions,
    ) -> Result<reqwest::Response, ApiError> {
        if self.teardown.in_progress() {
            return Err(ApiError::LoggingOut);
        }

        let token = if opts.auth {
            self.store.access_token().await?
        } else {
            None
        };

        let resp = self
            .send(method.clone(), path, body, token.as_deref())
            .await?;

        if resp.status() == StatusCode::UNAUTHORIZED && opts.auth && !opts.skip_refresh {
            let fresh = self.refresh.refresh(token.as_deref()).await?;
            tracing::debug!(path, "retrying with refreshed token");
            let retry = self.send(method, path, body, Some(fresh.as_str())).await?;
            if retry.status() == StatusCode::UNAUTHORIZED {
                tracing::warn!(path, "still unauthorized after refresh, tearing down session");
                self.teardown.run(SessionEvent::SessionExpired).await?;
                return Err(ApiError::SessionExpired);
            }
            return Ok(retry);
        }

        Ok(resp)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, &url);
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        Ok(req.send().await?)
    }

    /// Map a non-2xx response to `RequestFailed`, lifting the message out
    /// of a JSON error body when there is one.
    async fn error_from_response(status: StatusCode, resp: reqwest::Response) -> ApiError {
        let message = match resp.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("message")
                .and_then(|v| v.as_str())
                .or_else(|| body.get("error").and_then(|v| v.as_str()))
                .map(str::to_string),
            Err(_) => None,
        };
        ApiError::RequestFailed {
            status: status.as_u16(),
            message: message
                .unwrap_or_else(|| format!("request failed with status {}", status.as_u16())),
        }
    }

    pub(crate) fn teardown(&self) -> &Arc<Teardown> {
        &self.teardown
    }
}

/// Standard `{"data": ...}` response envelope.
#[derive(serde::Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_refresh_enabled() {
        let opts = RequestOptions::default();
        assert!(opts.auth);
        assert!(!opts.skip_refresh);
    }

    #[test]
    fn test_public_options_skip_everything() {
        let opts = RequestOptions::public();
        assert!(!opts.auth);
        assert!(opts.skip_refresh);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let store = Arc::new(genova_kv::MemoryStore::new());
        let client = ApiClient::new("http://localhost:9000/", store);
        assert_eq!(client.base_url, "http://localhost:9000");
    }
}
