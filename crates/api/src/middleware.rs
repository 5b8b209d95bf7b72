//! API middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use axum_extra::extract::CookieJar;
use photoshare_core::{PhotoService, SessionService, UserService};

use crate::extractors::SessionToken;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// User registration, authentication, and profile reads.
    pub user_service: UserService,
    /// Photo and comment aggregation and writes.
    pub photo_service: PhotoService,
    /// Session tokens behind the pluggable store.
    pub session_service: SessionService,
    /// Name of the session cookie.
    pub cookie_name: String,
}

/// Session-resolution middleware.
///
/// Reads the session cookie, resolves the token to a user, and stores the
/// user model plus the token in request extensions. Requests without a valid
/// session pass through untouched; the extractors decide whether that is an
/// error.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(cookie) = jar.get(&state.cookie_name)
        && let Ok(Some(user_id)) = state.session_service.user_id(cookie.value()).await
        && let Ok(user) = state.user_service.get(&user_id).await
    {
        req.extensions_mut()
            .insert(SessionToken(cookie.value().to_string()));
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
