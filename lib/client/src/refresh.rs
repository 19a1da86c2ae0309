//! Single-flight refresh-token exchange.
//!
//! Any number of requests can hit 401 at the same moment; exactly one
//! `POST /auth/refresh` may leave the device. Callers queue on an async
//! mutex and re-check the store once they hold it — whoever ran first has
//! already replaced the access token, and the late arrivals take the new
//! token without another network call.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::ApiError;
use crate::events::{SessionEvent, Teardown};
use crate::session::SessionStore;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshData {
    access_token: String,
}

#[derive(Deserialize)]
struct RefreshResponse {
    data: RefreshData,
}

/// Owns the in-flight refresh guard. One per [`crate::ApiClient`], shared
/// with it behind an `Arc` so the guard can be exercised in isolation.
pub struct RefreshCoordinator {
    http: reqwest::Client,
    base_url: String,
    store: SessionStore,
    teardown: Arc<Teardown>,
    flight: tokio::sync::Mutex<()>,
}

impl RefreshCoordinator {
    /// Build a standalone coordinator. [`crate::ApiClient`] does this
    /// internally; constructing one directly is useful for exercising the
    /// single-flight guard in isolation.
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        store: SessionStore,
        teardown: Arc<Teardown>,
    ) -> Self {
        Self {
            http,
            base_url,
            store,
            teardown,
            flight: tokio::sync::Mutex::new(()),
        }
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// `stale` is the access token the caller just saw rejected (None when
    /// the request went out without one). If the stored token already
    /// differs from it, another caller completed the exchange while we
    /// waited on the guard and the stored token is returned as-is.
    ///
    /// A missing refresh token or a non-2xx refresh response tears the
    /// session down and fails with [`ApiError::SessionExpired`]. Transport
    /// failures surface as [`ApiError::Network`] and leave the session
    /// intact — connectivity loss is not proof the session is dead.
    pub async fn refresh(&self, stale: Option<&str>) -> Result<String, ApiError> {
        let _flight = self.flight.lock().await;

        if let Some(current) = self.store.access_token().await? {
            if stale != Some(current.as_str()) {
                tracing::debug!("refresh already completed by a concurrent caller");
                return Ok(current);
            }
        }

        let Some(refresh_token) = self.store.refresh_token().await? else {
            tracing::debug!("no refresh token stored, tearing down session");
            self.teardown.run(SessionEvent::SessionExpired).await?;
            return Err(ApiError::SessionExpired);
        };

        let url = format!("{}/auth/refresh", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "refresh rejected, tearing down session");
            self.teardown.run(SessionEvent::SessionExpired).await?;
            return Err(ApiError::SessionExpired);
        }

        let body: RefreshResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("refresh response: {e}")))?;
        self.store.set_access_token(&body.data.access_token).await?;
        tracing::debug!("access token refreshed");

        Ok(body.data.access_token)
    }
}
