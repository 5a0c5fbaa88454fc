use std::{collections::HashMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};

use super::KeyValueStore;
use crate::errors::StorageError;

/// File-backed key-value store.
///
/// Persists the whole `HashMap<String, String>` to one JSON file and rewrites
/// it on every mutation. Intended for lightweight per-device state where a
/// database is overkill.
#[derive(Clone)]
pub struct JsonFileStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
    file_path: PathBuf,
}

impl JsonFileStore {
    /// Open the store at `path`. Creates the file with an empty map if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StorageError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: HashMap<String, String> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => {
                let empty: HashMap<String, String> = HashMap::new();
                fs::write(&file_path, serde_json::to_vec(&empty).map_err(StorageError::serde)?)
                    .await
                    .map_err(StorageError::backend)?;
                empty
            }
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path }))
    }

    async fn save(&self) -> Result<(), StorageError> {
        let map = self.inner.read().await;
        let data = serde_json::to_vec(&*map).map_err(StorageError::serde)?;
        fs::write(&self.file_path, data).await.map_err(StorageError::backend)?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn set(&self, key: String, value: String) -> Result<(), StorageError> {
        let mut map = self.inner.write().await;
        map.insert(key, value);
        drop(map);
        self.save().await
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut map = self.inner.write().await;
        let existed = map.remove(key).is_some();
        drop(map);
        self.save().await?;
        Ok(existed)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut map = self.inner.write().await;
        map.clear();
        drop(map);
        self.save().await
    }
}
