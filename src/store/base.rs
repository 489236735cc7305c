use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use super::memory_store::MemoryStorage;
use crate::config::StorageConfig;

/// A change applied to a storage scope.
///
/// `key == None` means the whole scope was cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: Option<String>,
    pub new_value: Option<String>,
}

/// The Storage trait abstracts a tab-scoped key/value area.
///
/// Reads and writes are synchronous and never fail. Every mutation is
/// announced to subscribers so other holders of the same scope can
/// re-derive their view of the session.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
    /// Removes every key in the scope, not only the ones this crate writes.
    fn clear(&self);
    fn subscribe(&self) -> broadcast::Receiver<StorageEvent>;

    /// Writes several keys. Implementations should make the batch visible as
    /// a unit to concurrent readers.
    fn set_items(&self, items: &[(&str, &str)]) {
        for (key, value) in items {
            self.set_item(key, value);
        }
    }
}

/// Creates a concrete storage implementation based on the StorageConfig.
pub fn create_storage(config: &StorageConfig) -> Arc<dyn Storage> {
    match config {
        StorageConfig::Memory(memory) => {
            info!(
                event_capacity = memory.event_capacity,
                "Using in-memory session storage"
            );
            Arc::new(MemoryStorage::new(memory.event_capacity))
        }
    }
}
