//! HTTP API layer for photoshare-rs.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: registration, login/logout, user and photo reads,
//!   comment and photo writes
//! - **Extractors**: session-cookie authentication
//! - **Middleware**: session resolution
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;

use axum::Router;

pub use endpoints::router;
pub use middleware::AppState;

/// Build the application router with session middleware applied.
pub fn app(state: AppState) -> Router {
    endpoints::router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ))
        .with_state(state)
}
