//! API endpoints.

mod auth;
mod photos;
mod test;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(photos::router())
        .merge(test::router())
}
