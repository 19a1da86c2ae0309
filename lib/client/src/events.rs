//! Session lifecycle events and teardown.
//!
//! The HTTP layer never navigates. When a session dies it clears the
//! credential store and publishes a [`SessionEvent`]; whatever owns the
//! UI subscribes and routes the user back to its unauthenticated entry
//! point.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

use crate::error::ApiError;
use crate::session::SessionStore;

/// Published when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Refresh failed or a retried request was rejected again. The user
    /// did not ask for this.
    SessionExpired,
    /// Explicit logout.
    LoggedOut,
}

/// Shared teardown machinery.
///
/// Concurrent invocations collapse into one: only the caller that wins the
/// `in_progress` flag clears the store and publishes, the rest return
/// immediately. While a teardown runs, the request wrapper rejects new
/// requests with [`ApiError::LoggingOut`].
pub struct Teardown {
    store: SessionStore,
    tx: broadcast::Sender<SessionEvent>,
    in_progress: AtomicBool,
}

impl Teardown {
    pub fn new(store: SessionStore) -> Self {
        let (tx, _) = broadcast::channel(16);
        Self {
            store,
            tx,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Whether a teardown is currently running.
    pub fn in_progress(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }

    /// Erase the session and publish `event`.
    ///
    /// The event is published only when some credential was actually
    /// erased, so repeated teardowns of an already-dead session stay
    /// silent. Lack of subscribers is not an error.
    pub(crate) async fn run(&self, event: SessionEvent) -> Result<(), ApiError> {
        if self.in_progress.swap(true, Ordering::SeqCst) {
            // Another teardown is already running; it owns the event.
            return Ok(());
        }

        let result = self.store.clear().await;
        if let Ok(true) = &result {
            tracing::info!(?event, "session torn down");
            let _ = self.tx.send(event);
        }
        self.in_progress.store(false, Ordering::SeqCst);

        result.map(|_| ())
    }
}
