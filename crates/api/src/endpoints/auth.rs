//! Registration and session endpoints.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use photoshare_common::{AppError, AppResult};
use photoshare_core::RegisterUserInput;
use serde::{Deserialize, Serialize};

use super::users::UserStub;
use crate::{extractors::MaybeSessionToken, middleware::AppState};

/// Registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: String,
    pub login_name: String,
}

/// Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterUserInput>,
) -> AppResult<Json<RegisterResponse>> {
    let user = state.user_service.register(input).await?;

    Ok(Json(RegisterResponse {
        id: user.id,
        login_name: user.login_name,
    }))
}

/// Login request. Absent fields default to empty and fail credential
/// checking like any other wrong value.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub login_name: String,
    #[serde(default)]
    pub password: String,
}

/// Log in with login name and password.
///
/// On success a new session is created and its token set as an http-only
/// cookie alongside the logged-in user's stub.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<UserStub>)> {
    let user = state
        .user_service
        .authenticate(&req.login_name, &req.password)
        .await?;

    let token = state.session_service.create(&user.id).await?;

    let cookie = Cookie::build((state.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .build();

    Ok((jar.add(cookie), Json(user.into())))
}

/// Log out the current session.
///
/// A request without an active session is a client error, not an auth
/// failure: 400 rather than 401.
async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    MaybeSessionToken(token): MaybeSessionToken,
) -> AppResult<(CookieJar, StatusCode)> {
    let Some(token) = token else {
        return Err(AppError::BadRequest("No user logged in".to_string()));
    };

    state.session_service.destroy(&token).await?;

    let removal = Cookie::build((state.cookie_name.clone(), ""))
        .path("/")
        .build();

    Ok((jar.remove(removal), StatusCode::OK))
}

/// Create the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", post(register))
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout))
}
