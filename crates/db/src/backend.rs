//! Where collections live on this machine.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use tokio::sync::RwLock;

use crate::keys::CollectionKey;

/// Raw key/value persistence. Values are serialized JSON documents.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn load(&self, key: CollectionKey) -> Result<Option<String>>;

    async fn save(&self, key: CollectionKey, data: &str) -> Result<()>;
}

/// One JSON file per collection inside a data directory.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root)
            .await
            .wrap_err_with(|| format!("Failed to create data directory {}", root.display()))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: CollectionKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn load(&self, key: CollectionKey) -> Result<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).wrap_err_with(|| format!("Failed to read {}", path.display())),
        }
    }

    async fn save(&self, key: CollectionKey, data: &str) -> Result<()> {
        let path = self.path_for(key);
        // Write then rename: readers only ever see complete documents.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, data)
            .await
            .wrap_err_with(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .wrap_err_with(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

/// In-process storage for tests and throwaway runs.
#[derive(Default)]
pub struct MemoryBackend {
    data: RwLock<HashMap<CollectionKey, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn load(&self, key: CollectionKey) -> Result<Option<String>> {
        Ok(self.data.read().await.get(&key).cloned())
    }

    async fn save(&self, key: CollectionKey, data: &str) -> Result<()> {
        self.data.write().await.insert(key, data.to_string());
        Ok(())
    }
}
