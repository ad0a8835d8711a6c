use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

use crate::{backend::StorageBackend, keys::CollectionKey, mirror::CloudMirror};

// Mock collaborators for testing
mock! {
    pub Mirror {}

    #[async_trait]
    impl CloudMirror for Mirror {
        async fn push(&self, key: CollectionKey, value: &Value) -> eyre::Result<()>;
    }
}

mock! {
    pub Backend {}

    #[async_trait]
    impl StorageBackend for Backend {
        async fn load(&self, key: CollectionKey) -> eyre::Result<Option<String>>;

        async fn save(&self, key: CollectionKey, data: &str) -> eyre::Result<()>;
    }
}
