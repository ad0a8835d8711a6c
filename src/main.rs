use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use studio_api::{assistant::GeminiAssistant, config::ApiConfig};
use studio_db::{backend::FileBackend, mirror, Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    studio_api::init_tracing(config.log_level)?;

    // The cloud mirror is optional; without it the studio runs on local files alone
    let cloud_mirror = mirror::connect_optional(config.database_url.as_deref()).await;

    // Open the persistent store
    let backend = FileBackend::open(&config.data_dir).await?;
    let store = Arc::new(Store::open(Arc::new(backend), cloud_mirror).await?);

    let assistant = Arc::new(GeminiAssistant::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
    ));

    // Start API server
    studio_api::start_server(config, store, assistant).await?;

    Ok(())
}
