//! Data-access operations.
//!
//! `BlogClient` is the crate's front door: one thin async method per
//! server capability, each composed from the transport and the resource
//! cache. The view layer calls these methods and never touches the
//! session store or the cache directly.

mod auth;
mod posts;

use crate::cache::ResourceCache;
use crate::client::HttpClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::{SessionEvents, SessionStore};

/// Client for the Scribe blog API.
///
/// Cheap to clone; clones share the session, cache, and connection
/// pool.
#[derive(Clone)]
pub struct BlogClient {
    http: HttpClient,
    cache: ResourceCache,
    session: SessionStore,
    events: SessionEvents,
}

impl BlogClient {
    /// Build a client with a durable session store at the configured
    /// (or platform-default) location.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let session_path = config
            .session_path
            .clone()
            .unwrap_or_else(SessionStore::default_path);
        Self::with_session(config, SessionStore::open(session_path)?)
    }

    /// Build a client around an injected session store. This is how
    /// tests run several isolated sessions in one process.
    pub fn with_session(config: &ClientConfig, session: SessionStore) -> Result<Self, ApiError> {
        let events = SessionEvents::new();
        let cache = ResourceCache::new();
        let http = HttpClient::new(config, session.clone(), cache.clone(), events.clone())?;

        Ok(Self {
            http,
            cache,
            session,
            events,
        })
    }

    /// The session store backing this client.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Session lifecycle events. A top-level coordinator subscribes to
    /// this to route the user back to login when the session expires.
    pub fn events(&self) -> &SessionEvents {
        &self.events
    }
}
