use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Creates the table the cloud mirror writes into.
pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing mirror schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS app_state (
            key VARCHAR(64) PRIMARY KEY,
            data JSONB NOT NULL,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    info!("Mirror schema initialized successfully.");
    Ok(())
}
