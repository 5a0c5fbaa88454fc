use async_trait::async_trait;

use crate::errors::StorageError;

pub mod json_file;
pub mod memory;

/// Trait abstraction for the async key-value collaborator.
/// Implementations can be in-memory, file-backed, or device storage bridges.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the JSON text stored under `key`; `Ok(None)` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Store JSON text under `key`, replacing any previous value.
    async fn set(&self, key: String, value: String) -> Result<(), StorageError>;
    /// Remove `key`; returns whether an entry existed.
    async fn remove(&self, key: &str) -> Result<bool, StorageError>;
    /// Drop every entry.
    async fn clear(&self) -> Result<(), StorageError>;
}
