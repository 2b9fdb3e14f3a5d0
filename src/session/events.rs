//! Session-expiry signaling.
//!
//! The transport layer must not perform navigation when it sees a 401;
//! it only clears the session and raises this signal. A single top-level
//! coordinator (outside this crate) awaits `expired()` and routes the
//! user back to the login view.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Broadcast point for "the session just expired".
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct SessionEvents {
    expired: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self {
            expired: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Raise the expired signal. Idempotent.
    pub fn signal_expired(&self) {
        if !self.expired.swap(true, Ordering::SeqCst) {
            tracing::warn!("session expired, signaling subscribers");
            self.notify.notify_waiters();
        }
    }

    /// Whether the signal has been raised since the last `reset`.
    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::SeqCst)
    }

    /// Re-arm after a fresh sign-in.
    pub fn reset(&self) {
        self.expired.store(false, Ordering::SeqCst);
    }

    /// Wait until the signal is raised. Returns immediately if it
    /// already has been.
    pub async fn expired(&self) {
        loop {
            // Register interest before checking the flag so a signal
            // between the check and the await is not lost.
            let notified = self.notify.notified();
            if self.expired.load(Ordering::SeqCst) {
                return;
            }
            notified.await;
        }
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
