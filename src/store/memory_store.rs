use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tokio::sync::broadcast;

use super::base::{Storage, StorageEvent};

/// In-memory storage scope. Cloning the surrounding `Arc` shares the scope,
/// the way tabs of one origin share their storage area.
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
    events: broadcast::Sender<StorageEvent>,
}

impl MemoryStorage {
    pub fn new(event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            items: RwLock::new(HashMap::new()),
            events,
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn notify(&self, key: Option<&str>, new_value: Option<&str>) {
        // No subscribers is fine; the send error only reports that.
        let _ = self.events.send(StorageEvent {
            key: key.map(str::to_string),
            new_value: new_value.map(str::to_string),
        });
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self.notify(Some(key), Some(value));
    }

    fn remove_item(&self, key: &str) {
        let removed = self
            .items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        if removed.is_some() {
            self.notify(Some(key), None);
        }
    }

    fn clear(&self) {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        let had_items = !items.is_empty();
        items.clear();
        drop(items);
        if had_items {
            self.notify(None, None);
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.events.subscribe()
    }

    fn set_items(&self, batch: &[(&str, &str)]) {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in batch {
            items.insert(key.to_string(), value.to_string());
        }
        drop(items);
        for (key, value) in batch {
            self.notify(Some(key), Some(value));
        }
    }
}
