//! Session state: the current bearer token.
//!
//! The store is an explicit, injectable object passed to the transport
//! and the data-access layer at construction time, never ambient global
//! state, so tests can run isolated sessions side by side in one
//! process. Backed by a TOML file under the platform data directory so
//! the session survives a restart; an in-memory variant exists for
//! tests.
//!
//! No expiry check happens here. Expiry is discovered reactively when
//! the server answers 401 (see the transport layer).

mod events;
mod secure;

pub use events::SessionEvents;
pub use secure::SecureString;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// On-disk shape of the session file.
///
/// The refresh token is written and cleared alongside the access token
/// but is not consumed by any read path yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// Thread-safe session container with interior mutability.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<PersistedSession>>,
    backing: Option<PathBuf>,
}

impl SessionStore {
    /// Default session file location:
    /// `<config_dir>/scribe/session.toml`.
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("scribe").join("session.toml")
    }

    /// Open a store backed by the given file, loading any persisted
    /// session. A missing file means "signed out"; an unreadable one is
    /// an error; a corrupt one is discarded with a warning.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ApiError> {
        let path = path.into();
        let session = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "discarding corrupt session file");
                PersistedSession::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PersistedSession::default(),
            Err(e) => {
                return Err(ApiError::SessionStorage {
                    path,
                    source: e,
                })
            }
        };

        Ok(Self {
            inner: Arc::new(RwLock::new(session)),
            backing: Some(path),
        })
    }

    /// A store with no backing file. Used by tests and ephemeral
    /// sessions.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(PersistedSession::default())),
            backing: None,
        }
    }

    /// Current access token, if a session is active.
    pub fn token(&self) -> Option<SecureString> {
        self.inner
            .read()
            .access_token
            .clone()
            .map(SecureString::new)
    }

    /// Whether a session is active.
    pub fn is_signed_in(&self) -> bool {
        self.inner.read().access_token.is_some()
    }

    /// Store a fresh access token and persist it.
    pub fn set_token(&self, token: &str) -> Result<(), ApiError> {
        {
            let mut guard = self.inner.write();
            guard.access_token = Some(token.to_string());
        }
        self.persist()
    }

    /// Destroy the session: drop the access token and the refresh
    /// token, then persist the empty state.
    pub fn clear(&self) -> Result<(), ApiError> {
        {
            let mut guard = self.inner.write();
            guard.access_token = None;
            guard.refresh_token = None;
        }
        self.persist()
    }

    fn persist(&self) -> Result<(), ApiError> {
        let Some(path) = &self.backing else {
            return Ok(());
        };

        let content = {
            let guard = self.inner.read();
            toml::to_string(&*guard).unwrap_or_default()
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| storage_error(path, e))?;
        }
        fs::write(path, content).map_err(|e| storage_error(path, e))
    }
}

fn storage_error(path: &Path, source: std::io::Error) -> ApiError {
    ApiError::SessionStorage {
        path: path.to_path_buf(),
        source,
    }
}
