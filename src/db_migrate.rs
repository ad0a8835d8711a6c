use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use std::path::PathBuf;
use studio_db::{
    backend::{FileBackend, StorageBackend},
    mirror::{CloudMirror, PgMirror},
    schema::initialize_database,
    CollectionKey,
};

/// Creates the mirror table and copies every local collection into it.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;
    let data_dir = std::env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"));

    println!("Connecting to database...");
    let db_pool = studio_db::create_pool(&database_url).await?;

    println!("Initializing database schema...");
    initialize_database(&db_pool).await?;

    let backend = FileBackend::open(&data_dir).await?;
    let mirror = PgMirror::new(db_pool);
    let mut copied = 0;
    for key in CollectionKey::ALL {
        let Some(raw) = backend.load(key).await? else {
            continue;
        };
        let value: serde_json::Value =
            serde_json::from_str(&raw).wrap_err_with(|| format!("Corrupt collection {}", key))?;
        mirror.push(key, &value).await?;
        copied += 1;
    }
    println!(
        "Database schema initialized; {} collections copied from {}.",
        copied,
        data_dir.display()
    );

    Ok(())
}
