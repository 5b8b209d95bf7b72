//! Connectivity-check endpoints.

use axum::{Json, Router, extract::State, routing::get};
use photoshare_common::AppResult;
use serde::Serialize;

use crate::middleware::AppState;

/// Row counts per collection.
#[derive(Debug, Serialize)]
pub struct CountsResponse {
    pub user: u64,
    pub photo: u64,
}

/// Report collection counts. Unauthenticated, used as a liveness probe.
async fn counts(State(state): State<AppState>) -> AppResult<Json<CountsResponse>> {
    let user = state.user_service.count().await?;
    let photo = state.photo_service.count().await?;

    Ok(Json(CountsResponse { user, photo }))
}

/// Create the test router.
pub fn router() -> Router<AppState> {
    Router::new().route("/test/counts", get(counts))
}
