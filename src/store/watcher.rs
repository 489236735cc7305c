use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::session_store::SessionStore;

/// Authentication status as last derived from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub user_id: Option<String>,
    pub username: Option<String>,
}

impl AuthStatus {
    pub fn read(store: &SessionStore) -> Self {
        let record = store.record();
        AuthStatus {
            authenticated: record.is_authenticated(),
            user_id: record.user_id,
            username: record.username,
        }
    }
}

/// Keeps an `AuthStatus` in step with storage changes made by any holder of
/// the same scope (another tab, a 401 handler, a logout).
///
/// Ordering against in-flight requests elsewhere is not guaranteed.
pub struct SessionWatcher {
    status: watch::Receiver<AuthStatus>,
    task: JoinHandle<()>,
}

impl SessionWatcher {
    /// Must be called inside a Tokio runtime.
    pub fn spawn(store: SessionStore) -> Self {
        // Subscribe before the first read so no change slips in between.
        let mut events = store.subscribe();
        let (tx, status) = watch::channel(AuthStatus::read(&store));

        let task = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        debug!(key = ?event.key, "Storage change detected, checking auth state");
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Session watcher lagged, re-reading storage");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
                let next = AuthStatus::read(&store);
                tx.send_if_modified(|current| {
                    if *current == next {
                        return false;
                    }
                    debug!(
                        authenticated = next.authenticated,
                        user_id = ?next.user_id,
                        "Auth state updated"
                    );
                    *current = next;
                    true
                });
                if tx.is_closed() {
                    break;
                }
            }
        });

        SessionWatcher { status, task }
    }

    pub fn current(&self) -> AuthStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.clone()
    }
}

impl Drop for SessionWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
