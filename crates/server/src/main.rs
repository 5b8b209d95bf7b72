//! Photoshare server entry point.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, http::HeaderValue, middleware};
use photoshare_api::{middleware::AppState, router as api_router};
use photoshare_common::{Config, LocalStorage};
use photoshare_core::{MemorySessionStore, PhotoService, SessionService, UserService};
use photoshare_db::repositories::{PhotoRepository, UserRepository};
use tokio::signal;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photoshare=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting photoshare server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database and run migrations
    let db = photoshare_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    photoshare_db::migrate(&db).await?;
    info!("Migrations completed");

    // Photo storage directory
    let images_path = PathBuf::from(&config.storage.images_path);
    tokio::fs::create_dir_all(&images_path).await?;
    let storage = Arc::new(LocalStorage::new(
        images_path.clone(),
        config.storage.images_url.clone(),
    ));

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let photo_repo = PhotoRepository::new(Arc::clone(&db));

    // Initialize services
    let user_service = UserService::new(user_repo.clone());
    let photo_service = PhotoService::new(photo_repo, user_repo, storage);
    let session_service = SessionService::new(Arc::new(MemorySessionStore::new()));

    // Create app state
    let state = AppState {
        user_service,
        photo_service,
        session_service,
        cookie_name: config.session.cookie_name.clone(),
    };

    // The client sends the session cookie cross-origin, so CORS must name
    // its origin explicitly and allow credentials.
    let cors = CorsLayer::new()
        .allow_origin(config.server.client_origin.parse::<HeaderValue>()?)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .merge(api_router())
        .nest_service(&config.storage.images_url, ServeDir::new(&images_path))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            photoshare_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
