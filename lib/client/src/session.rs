//! Typed session state on top of the secure store.
//!
//! Three keys make up a session: the access token, the refresh token, and
//! the cached user profile. All of them are written at login, the access
//! token is replaced on refresh, and all of them are erased at teardown.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use genova_kv::SecureStore;

use crate::error::ApiError;

/// Store key for the short-lived bearer token.
pub const ACCESS_TOKEN_KEY: &str = "auth:access_token";
/// Store key for the refresh token. Only ever sent to the refresh endpoint.
pub const REFRESH_TOKEN_KEY: &str = "auth:refresh_token";
/// Store key for the cached user profile.
pub const USER_KEY: &str = "auth:user";

/// Token pair persisted at login.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// User profile cached alongside the tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    /// "student" or "tutor".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Typed accessors over the secure store.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn SecureStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn SecureStore>) -> Self {
        Self { store }
    }

    /// Current access token, if any.
    pub async fn access_token(&self) -> Result<Option<String>, ApiError> {
        self.get_string(ACCESS_TOKEN_KEY).await
    }

    /// Current refresh token, if any.
    pub async fn refresh_token(&self) -> Result<Option<String>, ApiError> {
        self.get_string(REFRESH_TOKEN_KEY).await
    }

    /// Cached user profile, if any.
    pub async fn profile(&self) -> Result<Option<UserProfile>, ApiError> {
        match self.store.get(USER_KEY).await? {
            Some(bytes) => {
                let profile = serde_json::from_slice(&bytes)
                    .map_err(|e| ApiError::Decode(format!("cached profile: {e}")))?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    /// Persist a freshly created session.
    pub async fn store_login(
        &self,
        tokens: &SessionTokens,
        profile: &UserProfile,
    ) -> Result<(), ApiError> {
        self.store
            .set(ACCESS_TOKEN_KEY, tokens.access_token.as_bytes())
            .await?;
        self.store
            .set(REFRESH_TOKEN_KEY, tokens.refresh_token.as_bytes())
            .await?;
        let bytes = serde_json::to_vec(profile)
            .map_err(|e| ApiError::Decode(format!("cached profile: {e}")))?;
        self.store.set(USER_KEY, &bytes).await?;
        Ok(())
    }

    /// Replace the access token after a successful refresh.
    pub async fn set_access_token(&self, token: &str) -> Result<(), ApiError> {
        self.store.set(ACCESS_TOKEN_KEY, token.as_bytes()).await?;
        Ok(())
    }

    /// Erase every session key. Returns whether anything was stored —
    /// teardown uses this to avoid announcing an already-dead session.
    pub async fn clear(&self) -> Result<bool, ApiError> {
        let mut had_any = false;
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if self.store.get(key).await?.is_some() {
                had_any = true;
            }
            self.store.delete(key).await?;
        }
        Ok(had_any)
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>, ApiError> {
        match self.store.get(key).await? {
            Some(bytes) => {
                let value = String::from_utf8(bytes)
                    .map_err(|e| ApiError::Decode(format!("{key}: {e}")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genova_kv::MemoryStore;

    fn session() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStore::new()))
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".into(),
            email: "alice@example.com".into(),
            name: "Alice".into(),
            role: Some("student".into()),
        }
    }

    #[tokio::test]
    async fn test_empty_session() {
        let session = session();
        assert!(session.access_token().await.unwrap().is_none());
        assert!(session.refresh_token().await.unwrap().is_none());
        assert!(session.profile().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_roundtrip() {
        let session = session();
        let tokens = SessionTokens {
            access_token: "A1".into(),
            refresh_token: "R1".into(),
        };
        session.store_login(&tokens, &profile()).await.unwrap();

        assert_eq!(session.access_token().await.unwrap().as_deref(), Some("A1"));
        assert_eq!(session.refresh_token().await.unwrap().as_deref(), Some("R1"));
        assert_eq!(session.profile().await.unwrap(), Some(profile()));
    }

    #[tokio::test]
    async fn test_refresh_replaces_access_token_only() {
        let session = session();
        let tokens = SessionTokens {
            access_token: "A1".into(),
            refresh_token: "R1".into(),
        };
        session.store_login(&tokens, &profile()).await.unwrap();

        session.set_access_token("A2").await.unwrap();
        assert_eq!(session.access_token().await.unwrap().as_deref(), Some("A2"));
        assert_eq!(session.refresh_token().await.unwrap().as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn test_clear_erases_all_keys() {
        let session = session();
        let tokens = SessionTokens {
            access_token: "A1".into(),
            refresh_token: "R1".into(),
        };
        session.store_login(&tokens, &profile()).await.unwrap();

        assert!(session.clear().await.unwrap());
        assert!(session.access_token().await.unwrap().is_none());
        assert!(session.refresh_token().await.unwrap().is_none());
        assert!(session.profile().await.unwrap().is_none());

        // Second clear finds nothing.
        assert!(!session.clear().await.unwrap());
    }

    #[tokio::test]
    async fn test_profile_camel_case_wire_format() {
        let json = r#"{"id":"u2","email":"bob@example.com","name":"Bob","role":"tutor"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.role.as_deref(), Some("tutor"));
    }
}
