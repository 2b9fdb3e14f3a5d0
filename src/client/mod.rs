//! Authenticated HTTP transport.
//!
//! One shared `reqwest::Client` configured with the API base address and
//! a hard per-request timeout. Two cross-cutting behaviors live here:
//!
//! - every outbound request gets `Authorization: Bearer <token>` when
//!   the session store holds a token, and nothing when it does not;
//! - every 401 response clears the session store, stales the cache
//!   entries only that session could read, raises the session-expired
//!   signal, and still fails the original call: the call site never
//!   observes a 401 as success.
//!
//! Transport failures (timeout, unreachable host) propagate with no
//! retry; retry policy belongs to the caller.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::ResourceCache;
use crate::config::ClientConfig;
use crate::error::{ApiError, ErrorBody};
use crate::session::{SessionEvents, SessionStore};

/// Shared transport for all data-access operations.
///
/// Cheap to clone; clones share the underlying connection pool and
/// session state.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    session: SessionStore,
    cache: ResourceCache,
    events: SessionEvents,
}

impl HttpClient {
    pub fn new(
        config: &ClientConfig,
        session: SessionStore,
        cache: ResourceCache,
        events: SessionEvents,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            cache,
            events,
        })
    }

    /// Build a request against `path`, attaching the bearer credential
    /// when a session is active.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method, url);

        if let Some(token) = self.session.token() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.expose()));
        }

        builder
    }

    /// Send a request and run the response interceptor.
    ///
    /// 401 clears the session, stales session-scoped cache entries,
    /// signals expiry, and maps to `Unauthorized`. Other error
    /// statuses map to `Server` with the
    /// message pulled from the JSON body. Everything else passes
    /// through.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.session.clear() {
                tracing::warn!(error = %e, "failed to clear session after 401");
            }
            // The session is gone; nothing cached under it may be
            // served to whoever signs in next.
            self.cache.invalidate_session_scoped();
            self.events.signal_expired();
            return Err(ApiError::Unauthorized);
        }

        if status.is_client_error() || status.is_server_error() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.first_message(),
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            tracing::debug!(status = status.as_u16(), %message, "server reported failure");
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path).json(body);
        let response = self.execute(builder).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PUT, path).json(body);
        let response = self.execute(builder).await?;
        Ok(response.json().await?)
    }

    /// DELETE with no response body expected (204).
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}
