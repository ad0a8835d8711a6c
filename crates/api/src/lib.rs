//! # Studio API
//!
//! The API crate provides the web server for the yoga studio booking service.
//! It defines RESTful endpoints for accounts, the content feed, the weekly
//! lesson schedule, the Q&A board, studio settings and the AI assistant.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Sessions, authentication extractors and error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and the `studio-db` store for
//! persistence.

/// AI assistant used for descriptions and the student chat
pub mod assistant;
/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for sessions, authentication, and error handling
pub mod middleware;
/// Per-session notification inboxes
pub mod notifications;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{extract::DefaultBodyLimit, Router};
use eyre::{Result, WrapErr};
use studio_db::Store;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

use crate::{
    assistant::AssistantService, middleware::session::SessionStore,
    notifications::NotificationHub,
};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Persistent studio data
    pub store: Arc<Store>,
    pub sessions: SessionStore,
    pub notifications: NotificationHub,
    pub assistant: Arc<dyn AssistantService>,
}

impl ApiState {
    pub fn new(store: Arc<Store>, assistant: Arc<dyn AssistantService>) -> Self {
        Self {
            store,
            sessions: SessionStore::new(),
            notifications: NotificationHub::new(),
            assistant,
        }
    }

    /// Closes one session; the inbox goes with the user's last session.
    pub async fn end_session(&self, token: Uuid) {
        if let Some(user_id) = self.sessions.close(token).await {
            if !self.sessions.is_active(user_id).await {
                self.notifications.deactivate(user_id).await;
            }
        }
    }

    pub async fn end_user_sessions(&self, user_id: Uuid) {
        self.sessions.close_user(user_id).await;
        self.notifications.deactivate(user_id).await;
    }
}

/// Inline `data:` uploads travel in JSON bodies
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Builds the application router with all routes attached to `state`
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Login, registration and password recovery
        .merge(routes::auth::routes())
        // Student management and the teacher's own account
        .merge(routes::users::routes())
        // Content feed
        .merge(routes::content::routes())
        // Weekly schedule and bookings
        .merge(routes::schedule::routes())
        // Q&A board
        .merge(routes::qa::routes())
        // Studio settings and theme
        .merge(routes::settings::routes())
        // Notifications, assistant chat and store sync
        .merge(routes::notifications::routes())
        .merge(routes::assistant::routes())
        .merge(routes::sync::routes())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        // Attach shared state to all routes
        .with_state(state)
}

/// Installs the global `tracing` subscriber at the given level
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Starts the API server with the provided configuration and store
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `store` - The opened studio store
/// * `assistant` - The AI assistant implementation
///
/// # Example
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use studio_api::{assistant::GeminiAssistant, config::ApiConfig, start_server};
/// # use studio_db::{backend::FileBackend, Store};
/// # async fn run() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// let backend = FileBackend::open(&config.data_dir).await?;
/// let store = Arc::new(Store::open(Arc::new(backend), None).await?);
/// let assistant = Arc::new(GeminiAssistant::new(None, "gemini-3-flash-preview"));
/// start_server(config, store, assistant).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(
    config: config::ApiConfig,
    store: Arc<Store>,
    assistant: Arc<dyn AssistantService>,
) -> Result<()> {
    // Keep the cache in step with other processes writing the same data dir
    let _poller = config
        .sync_poll_seconds
        .filter(|secs| *secs > 0)
        .map(|secs| store.spawn_poller(Duration::from_secs(secs)));

    // Create shared state with dependencies
    let state = Arc::new(ApiState::new(store, assistant));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("Invalid origin in API_CORS_ORIGINS")?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Request logging and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
