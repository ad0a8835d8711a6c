//! Best-effort copy of every collection to a shared Postgres database, so
//! other devices can pick up changes.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;
use serde_json::Value;
use tracing::{info, warn};

use crate::{create_pool, keys::CollectionKey, schema::initialize_database, DbPool};

#[async_trait]
pub trait CloudMirror: Send + Sync {
    async fn push(&self, key: CollectionKey, value: &Value) -> Result<()>;
}

pub struct PgMirror {
    pool: DbPool,
}

impl PgMirror {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Connects and makes sure the mirror table exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        initialize_database(&pool).await?;
        Ok(Self::new(pool))
    }
}

/// Any failure to reach or prepare the mirror is logged and the studio runs
/// on local storage alone.
pub async fn connect_optional(database_url: Option<&str>) -> Option<Arc<dyn CloudMirror>> {
    let url = database_url?;
    match PgMirror::connect(url).await {
        Ok(mirror) => {
            info!("Cloud mirror enabled");
            Some(Arc::new(mirror))
        }
        Err(e) => {
            warn!("Cloud mirror unavailable, continuing without it: {}", e);
            None
        }
    }
}

#[async_trait]
impl CloudMirror for PgMirror {
    async fn push(&self, key: CollectionKey, value: &Value) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO app_state (key, data, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (key)
            DO UPDATE SET data = $2, updated_at = $3
            "#,
        )
        .bind(key.as_str())
        .bind(value.clone())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        tracing::debug!("Mirrored {} to cloud", key);
        Ok(())
    }
}
