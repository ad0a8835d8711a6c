//! The studio's single source of truth.
//!
//! Every collection is read and written as a whole JSON document. Writes
//! reach the local backend first, then the optional cloud mirror, and are
//! announced on a broadcast channel so open sessions can refresh. Updates
//! start from the backend's copy, so a write made by another process sharing
//! the backend is never clobbered by a stale cache. Reads serve the cache,
//! which [`Store::resync`] brings up to date; there is no merge beyond that.

use std::{collections::HashMap, sync::Arc, time::Duration};

use eyre::{Result, WrapErr};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use studio_core::errors::StudioResult;
use tokio::{
    sync::{broadcast, Mutex, RwLock},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{backend::StorageBackend, keys::CollectionKey, mirror::CloudMirror, seed};

const CHANGE_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// Written through this store.
    Local,
    /// Written by another process and noticed on resync.
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange {
    pub key: CollectionKey,
    pub origin: ChangeOrigin,
}

pub struct Store {
    backend: Arc<dyn StorageBackend>,
    mirror: Option<Arc<dyn CloudMirror>>,
    cache: RwLock<HashMap<CollectionKey, Value>>,
    // Serializes read-modify-write cycles inside this process.
    writer: Mutex<()>,
    changes: broadcast::Sender<StoreChange>,
}

impl Store {
    /// Loads every collection, seeding the ones that were never written.
    pub async fn open(
        backend: Arc<dyn StorageBackend>,
        mirror: Option<Arc<dyn CloudMirror>>,
    ) -> Result<Self> {
        let mut cache = HashMap::new();

        for key in CollectionKey::ALL {
            let value = match backend.load(key).await? {
                Some(raw) => serde_json::from_str(&raw)
                    .wrap_err_with(|| format!("Corrupt collection {}", key))?,
                None => {
                    let value = seed::default_value(key)?;
                    backend.save(key, &serde_json::to_string(&value)?).await?;
                    debug!("Seeded collection {}", key);
                    value
                }
            };
            cache.insert(key, value);
        }

        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        info!("Store opened with {} collections", cache.len());

        Ok(Self {
            backend,
            mirror,
            cache: RwLock::new(cache),
            writer: Mutex::new(()),
            changes,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: CollectionKey) -> Result<T> {
        let cache = self.cache.read().await;
        let value = match cache.get(&key) {
            Some(value) => value.clone(),
            None => seed::default_value(key)?,
        };
        serde_json::from_value(value).wrap_err_with(|| format!("Unexpected shape in {}", key))
    }

    /// Replaces a whole collection.
    pub async fn set<T: Serialize>(&self, key: CollectionKey, value: &T) -> Result<()> {
        let _guard = self.writer.lock().await;
        self.write(key, serde_json::to_value(value)?).await
    }

    /// Read-modify-write on one collection. When `f` fails nothing is written
    /// and no change is announced.
    pub async fn update<T, R, F>(&self, key: CollectionKey, f: F) -> StudioResult<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T) -> StudioResult<R>,
    {
        let _guard = self.writer.lock().await;
        let fresh = self.reload(key).await?;
        let mut current: T = serde_json::from_value(fresh)
            .wrap_err_with(|| format!("Unexpected shape in {}", key))?;
        let result = f(&mut current)?;
        self.write(key, serde_json::to_value(&current).map_err(eyre::Report::from)?)
            .await?;
        Ok(result)
    }

    /// Reads `key` from the backend so another process's last write is the
    /// base of the next one, and refreshes the cache with it.
    async fn reload(&self, key: CollectionKey) -> Result<Value> {
        let Some(raw) = self.backend.load(key).await? else {
            let cache = self.cache.read().await;
            return match cache.get(&key) {
                Some(value) => Ok(value.clone()),
                None => seed::default_value(key),
            };
        };
        let fresh: Value =
            serde_json::from_str(&raw).wrap_err_with(|| format!("Corrupt collection {}", key))?;

        let mut cache = self.cache.write().await;
        if cache.get(&key) != Some(&fresh) {
            debug!("Collection {} changed elsewhere, reloaded before update", key);
            cache.insert(key, fresh.clone());
        }
        Ok(fresh)
    }

    async fn write(&self, key: CollectionKey, value: Value) -> Result<()> {
        let raw = serde_json::to_string(&value)?;
        self.backend.save(key, &raw).await?;
        self.cache.write().await.insert(key, value.clone());
        debug!("Wrote collection {}", key);

        if let Some(mirror) = &self.mirror {
            if let Err(e) = mirror.push(key, &value).await {
                warn!("Cloud mirror failed for {}: {}", key, e);
            }
        }

        self.announce(StoreChange {
            key,
            origin: ChangeOrigin::Local,
        });
        Ok(())
    }

    fn announce(&self, change: StoreChange) {
        // No receivers simply means nobody is listening right now.
        let _ = self.changes.send(change);
    }

    /// A raw receiver of change events. Dropping it unsubscribes.
    pub fn changes(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }

    /// Calls `callback` for every change until the returned handle is
    /// dropped or [`Subscription::unsubscribe`] is called.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(StoreChange) + Send + Sync + 'static,
    {
        let mut rx = self.changes.subscribe();
        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(change) => callback(change),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Subscriber lagged, skipped {} changes", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        Subscription { task }
    }

    /// Re-reads every collection from the backend and announces the ones
    /// another process changed.
    pub async fn resync(&self) -> Result<Vec<CollectionKey>> {
        let mut changed = Vec::new();

        for key in CollectionKey::ALL {
            let Some(raw) = self.backend.load(key).await? else {
                continue;
            };
            let fresh: Value = match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Skipping unreadable collection {} on resync: {}", key, e);
                    continue;
                }
            };

            let mut cache = self.cache.write().await;
            if cache.get(&key) != Some(&fresh) {
                cache.insert(key, fresh);
                changed.push(key);
            }
        }

        for key in &changed {
            debug!("Collection {} changed elsewhere", key);
            self.announce(StoreChange {
                key: *key,
                origin: ChangeOrigin::Remote,
            });
        }
        Ok(changed)
    }

    /// Resyncs every `interval` until the handle is aborted.
    pub fn spawn_poller(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if let Err(e) = store.resync().await {
                    warn!("Resync failed: {}", e);
                }
            }
        })
    }
}

/// A live change listener.
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        self.task.abort();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
