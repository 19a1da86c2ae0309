//! Login, logout, and profile endpoints.

use reqwest::Method;
use serde::Deserialize;

use crate::client::{ApiClient, Envelope, RequestOptions};
use crate::error::ApiError;
use crate::events::SessionEvent;
use crate::session::{SessionTokens, UserProfile};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    access_token: String,
    refresh_token: String,
    user: UserProfile,
}

impl ApiClient {
    /// `POST /auth/login` — create a session and persist it.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });
        let resp: Envelope<LoginData> = self
            .request(Method::POST, "/auth/login", Some(&body), RequestOptions::public())
            .await?;

        let LoginData {
            access_token,
            refresh_token,
            user,
        } = resp.data;
        self.session()
            .store_login(
                &SessionTokens {
                    access_token,
                    refresh_token,
                },
                &user,
            )
            .await?;
        tracing::info!(user_id = %user.id, "logged in");
        Ok(user)
    }

    /// `POST /auth/logout`, then erase the session.
    ///
    /// The server call is best-effort: the local session dies whether or
    /// not the server heard about it.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let opts = RequestOptions {
            auth: true,
            skip_refresh: true,
        };
        match self
            .request_no_content(Method::POST, "/auth/logout", opts)
            .await
        {
            Ok(()) => {}
            Err(ApiError::LoggingOut) => {}
            Err(e) => tracing::debug!(error = %e, "server logout failed, clearing local session anyway"),
        }
        self.teardown().run(SessionEvent::LoggedOut).await
    }

    /// `GET /auth/me` — the authenticated user's profile.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let resp: Envelope<UserProfile> = self.get("/auth/me").await?;
        Ok(resp.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_data_wire_format() {
        let json = r#"{
            "accessToken": "A1",
            "refreshToken": "R1",
            "user": {"id": "u1", "email": "a@b.c", "name": "A"}
        }"#;
        let data: LoginData = serde_json::from_str(json).unwrap();
        assert_eq!(data.access_token, "A1");
        assert_eq!(data.refresh_token, "R1");
        assert_eq!(data.user.id, "u1");
        assert!(data.user.role.is_none());
    }
}
