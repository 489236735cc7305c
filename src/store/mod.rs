pub mod base;
pub mod memory_store;
pub mod session_store;
pub mod watcher;

// Re-export the primary storage items so code outside can do
// "use crate::store::{SessionStore, create_storage};"
pub use base::{create_storage, Storage, StorageEvent};
pub use memory_store::MemoryStorage;
pub use session_store::{SessionStatus, SessionStore};
pub use watcher::{AuthStatus, SessionWatcher};
