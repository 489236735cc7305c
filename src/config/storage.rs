use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Storage backends for the session record. We differentiate them via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(tag = "type")]
pub enum StorageConfig {
    #[serde(rename = "memory")]
    Memory(MemoryStorageConfig),
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Memory(MemoryStorageConfig::default())
    }
}

/// Tab-scoped, process-lifetime storage.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct MemoryStorageConfig {
    /// How many change notifications a slow listener may fall behind by.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_event_capacity() -> usize {
    64
}

impl Default for MemoryStorageConfig {
    fn default() -> Self {
        Self {
            event_capacity: default_event_capacity(),
        }
    }
}
