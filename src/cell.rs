use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::errors::StorageError;
use crate::identity::Identity;
use crate::store::KeyValueStore;

/// Reactive cell holding one user-scoped value with write-through persistence.
///
/// Setting the cell replaces the in-memory value synchronously and, for a
/// known identity, spawns exactly one store write of the JSON-encoded value
/// under `"{personalNumber}_{key}"`. An anonymous identity never touches the
/// store; the in-memory value still updates.
///
/// `set` spawns onto the ambient Tokio runtime and must be called from within
/// one.
pub struct PersonalCell<T> {
    identity: ArcSwap<Identity>,
    key: String,
    initial: T,
    store: Arc<dyn KeyValueStore>,
    tx: watch::Sender<T>,
}

impl<T> PersonalCell<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create a cell starting at `initial`. No store read occurs; use
    /// [`PersonalCell::load`] to seed from previously persisted state.
    pub fn new(
        identity: Identity,
        key: impl Into<String>,
        initial: T,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, StorageError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(StorageError::Validation("storage key must be non-empty".into()));
        }
        let (tx, _rx) = watch::channel(initial.clone());
        Ok(Self { identity: ArcSwap::from_pointee(identity), key, initial, store, tx })
    }

    /// Like [`PersonalCell::new`], but seeds the value from the store when an
    /// entry exists under the scoped key. Anonymous identities skip the read.
    pub async fn load(
        identity: Identity,
        key: impl Into<String>,
        initial: T,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, StorageError> {
        let cell = Self::new(identity, key, initial, store)?;
        if let Some(scoped) = cell.identity.load().scoped_key(&cell.key) {
            if let Some(raw) = cell.store.get(&scoped).await? {
                let value: T = serde_json::from_str(&raw).map_err(StorageError::serde)?;
                cell.tx.send_replace(value);
                debug!("seeded {} from store", scoped);
            }
        }
        Ok(cell)
    }

    pub fn key(&self) -> &str { &self.key }

    pub fn identity(&self) -> Identity {
        (*self.identity.load_full()).clone()
    }

    /// Current in-memory value.
    pub fn current(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Change notifications for the UI layer. The receiver wakes whenever
    /// [`PersonalCell::set`] or [`PersonalCell::reset`] replaces the value.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Swap the identity used by subsequent calls. Entries stored under the
    /// previous prefix are left as they are.
    pub fn set_identity(&self, identity: Identity) {
        self.identity.store(Arc::new(identity));
    }

    /// Replace the value and write it through to the store.
    ///
    /// The in-memory update is synchronous; persistence runs on a spawned task
    /// whose handle is returned so callers can await settlement. For an
    /// anonymous identity the store is untouched and `None` is returned.
    /// Rapid successive calls each issue an independent write with no ordering
    /// guarantee between them.
    pub fn set(&self, value: T) -> Option<JoinHandle<()>> {
        self.tx.send_replace(value.clone());
        let scoped = self.identity.load().scoped_key(&self.key)?;
        let store = Arc::clone(&self.store);
        Some(tokio::spawn(async move {
            let encoded = match serde_json::to_string(&value) {
                Ok(s) => s,
                Err(e) => {
                    warn!("failed to encode value for {}: {}", scoped, e);
                    return;
                }
            };
            if let Err(e) = store.set(scoped.clone(), encoded).await {
                warn!("write-through to {} failed: {}", scoped, e);
            }
        }))
    }

    /// Restore the initial value and drop the stored entry; returns whether an
    /// entry existed. `Ok(false)` without touching the store when anonymous.
    pub async fn reset(&self) -> Result<bool, StorageError> {
        self.tx.send_replace(self.initial.clone());
        match self.identity.load().scoped_key(&self.key) {
            Some(scoped) => self.store.remove(&scoped).await,
            None => Ok(false),
        }
    }
}
