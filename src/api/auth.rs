//! Account operations: sign-up, sign-in, sign-out, current user.

use super::BlogClient;
use crate::cache::CacheKey;
use crate::error::ApiError;
use crate::types::{Me, SignInPayload, SignInResponse, SignUpPayload, User};

/// Minimum password length enforced before any request is sent.
const MIN_PASSWORD_CHARS: usize = 6;

impl BlogClient {
    /// Register a new account. `POST /auth/signup`.
    ///
    /// Required fields and the password length are validated locally;
    /// failures surface as `Validation` with no request sent.
    pub async fn sign_up(&self, payload: &SignUpPayload) -> Result<User, ApiError> {
        if payload.name.trim().is_empty() {
            return Err(ApiError::Validation("name is required".to_string()));
        }
        if payload.email.trim().is_empty() {
            return Err(ApiError::Validation("email is required".to_string()));
        }
        if payload.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ApiError::Validation(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }

        self.http.post_json("/auth/signup", payload).await
    }

    /// Authenticate and start a session. `POST /auth/signin`.
    ///
    /// On success the returned access token is stored (and persisted)
    /// and the session-expired signal is re-armed.
    pub async fn sign_in(&self, payload: &SignInPayload) -> Result<(), ApiError> {
        if payload.email.trim().is_empty() {
            return Err(ApiError::Validation("email is required".to_string()));
        }
        if payload.password.is_empty() {
            return Err(ApiError::Validation("password is required".to_string()));
        }

        let response: SignInResponse = self.http.post_json("/auth/signin", payload).await?;
        self.session.set_token(&response.access_token)?;
        self.events.reset();
        tracing::debug!("session established");
        Ok(())
    }

    /// End the session locally. No server call is involved; the bearer
    /// token (and the unused refresh token) are dropped and every
    /// cache entry only this session may read is staled.
    pub fn sign_out(&self) -> Result<(), ApiError> {
        self.session.clear()?;
        self.cache.invalidate_session_scoped();
        tracing::debug!("session cleared");
        Ok(())
    }

    /// Fetch the authenticated identity. `GET /auth/me`.
    ///
    /// Skipped entirely when no session is active: returns
    /// `Unauthorized` without touching the network.
    pub async fn current_user(&self) -> Result<Me, ApiError> {
        if !self.session.is_signed_in() {
            return Err(ApiError::Unauthorized);
        }

        if let Some(me) = self.cache.read(&CacheKey::Me) {
            return Ok(me);
        }

        let me: Me = self.http.get_json("/auth/me").await?;
        self.cache.write(&CacheKey::Me, &me);
        Ok(me)
    }
}
