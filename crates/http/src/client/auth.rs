//! Authentication API client methods

use super::{ApiResponse, Call, RequestOptions, SessionClient, error::ClientError};
use crate::types::{AccessToken, LoginRequest, LoginResponse, MeResponse, RefreshResponse};
use medadmin_core::SessionUser;
use reqwest::Method;

impl SessionClient {
    /// Exchange credentials for an access token and the user record.
    ///
    /// A 401 here means bad credentials, so it never triggers a refresh. The
    /// returned token is not installed; callers decide what to do with it.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = serde_json::to_value(LoginRequest { email, password })?;
        self.request(
            Method::POST,
            "/auth/login",
            Some(&body),
            RequestOptions::terminal(),
        )
        .await?
        .json()
    }

    /// Invalidate the refresh cookie server-side
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.request(Method::POST, "/auth/logout", None, RequestOptions::default())
            .await?;
        Ok(())
    }

    /// Fetch the identity behind the current session
    pub async fn me(&self) -> Result<SessionUser, ClientError> {
        let response: MeResponse = self.get("/auth/me").await?;
        Ok(response.user)
    }

    /// Mint a new access token from the refresh cookie. Any failure,
    /// including a 401, is a [`ClientError::RefreshFailed`].
    pub(super) async fn refresh_access_token(&self) -> Result<AccessToken, ClientError> {
        let options = RequestOptions::terminal();
        let call = Call {
            method: Method::POST,
            path: "/auth/refresh-token",
            body: None,
            options: &options,
        };

        // A 401 from this endpoint ends the session; it must not re-enter recovery
        let response = self
            .dispatch(&call, self.access_token().as_ref())
            .await
            .and_then(ApiResponse::into_result)
            .map_err(ClientError::refresh_failed)?;

        let refreshed: RefreshResponse = response.json().map_err(ClientError::refresh_failed)?;
        Ok(refreshed.access_token)
    }
}
