use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::debug;

use super::base::{Storage, StorageEvent};
use crate::models::{SessionIdentity, SessionRecord};

pub const USER_ID_KEY: &str = "activeUserId";
pub const USERNAME_KEY: &str = "authenticatedUser";
pub const ROLE_KEY: &str = "role";
pub const TOKEN_KEY: &str = "basicAuth";

/// Anything that can answer "is there a live session right now?".
///
/// Implementations must re-derive the answer on every call.
pub trait SessionStatus: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

/// Typed access to the session record kept in a storage scope.
///
/// This is the only writer of the session keys; everything else mutates the
/// session through the gateway's login and logout operations.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Writes user id, username and role in one batch. The token is separate.
    pub fn save(&self, user_id: &str, username: &str, role: &str) {
        self.storage.set_items(&[
            (USER_ID_KEY, user_id),
            (USERNAME_KEY, username),
            (ROLE_KEY, role),
        ]);
        debug!(user_id, username, "Saved session identity");
    }

    pub fn save_identity(&self, identity: &SessionIdentity) {
        self.save(&identity.user_id, &identity.username, &identity.role);
    }

    pub fn store_token(&self, token: &str) {
        self.storage.set_item(TOKEN_KEY, token);
    }

    pub fn read_token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY)
    }

    pub fn read_user_id(&self) -> Option<String> {
        self.storage.get_item(USER_ID_KEY)
    }

    pub fn read_username(&self) -> Option<String> {
        self.storage.get_item(USERNAME_KEY)
    }

    pub fn read_role(&self) -> Option<String> {
        self.storage.get_item(ROLE_KEY)
    }

    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            user_id: self.read_user_id(),
            username: self.read_username(),
            role: self.read_role(),
            credential_token: self.read_token(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.record().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.record().is_admin()
    }

    /// Removes the four session keys and anything else in the scope.
    pub fn clear(&self) {
        for key in [USER_ID_KEY, USERNAME_KEY, ROLE_KEY, TOKEN_KEY] {
            self.storage.remove_item(key);
        }
        self.storage.clear();
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.storage.subscribe()
    }
}

impl SessionStatus for SessionStore {
    fn is_authenticated(&self) -> bool {
        SessionStore::is_authenticated(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    fn store() -> (SessionStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::default());
        (SessionStore::new(storage.clone()), storage)
    }

    #[test]
    fn save_then_token_authenticates_and_clear_revokes() {
        let cases = [
            ("42", "alice", "ROLE_USER", "Basic YWxpY2U6c2VjcmV0MQ=="),
            ("1", "root", "ROLE_ADMIN", "Basic cm9vdDpyb290cm9vdDE="),
            ("u-9", "bob", "ROLE_USER", "Basic Ym9iOmh1bnRlcjIy"),
        ];
        let (store, _) = store();
        for (id, name, role, token) in cases {
            store.save(id, name, role);
            store.store_token(token);
            assert!(store.is_authenticated());

            store.clear();
            assert!(!store.is_authenticated());
            assert_eq!(store.record(), SessionRecord::default());
        }
    }

    #[test]
    fn save_alone_is_not_a_session() {
        let (store, _) = store();
        store.save("42", "alice", "ROLE_USER");
        assert!(!store.is_authenticated());
        assert_eq!(store.read_username().as_deref(), Some("alice"));
    }

    #[test]
    fn token_alone_is_not_a_session() {
        let (store, _) = store();
        store.store_token("Basic YWxpY2U6c2VjcmV0MQ==");
        assert!(!store.is_authenticated());
    }

    #[test]
    fn keys_match_the_storage_layout() {
        let (store, storage) = store();
        store.save("42", "alice", "ROLE_USER");
        store.store_token("Basic YWxpY2U6c2VjcmV0MQ==");

        assert_eq!(storage.get_item("activeUserId").as_deref(), Some("42"));
        assert_eq!(
            storage.get_item("authenticatedUser").as_deref(),
            Some("alice")
        );
        assert_eq!(storage.get_item("role").as_deref(), Some("ROLE_USER"));
        assert_eq!(
            storage.get_item("basicAuth").as_deref(),
            Some("Basic YWxpY2U6c2VjcmV0MQ==")
        );
    }

    #[test]
    fn clear_drops_incidental_keys() {
        let (store, storage) = store();
        storage.set_item("lastVisitedTask", "17");
        store.save("42", "alice", "ROLE_ADMIN");
        assert!(store.is_admin());

        store.clear();
        assert!(storage.is_empty());
        assert!(!store.is_admin());
    }

    #[test]
    fn clones_share_the_scope() {
        let (store, _) = store();
        let other_tab = store.clone();
        store.save("42", "alice", "ROLE_USER");
        store.store_token("Basic YWxpY2U6c2VjcmV0MQ==");
        assert!(other_tab.is_authenticated());
    }
}
