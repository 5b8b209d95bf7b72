//! User read endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use photoshare_common::AppResult;
use photoshare_db::entities::user;
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState};

/// Minimal user representation, used wherever a user is referenced.
#[derive(Debug, Serialize)]
pub struct UserStub {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<user::Model> for UserStub {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Full user profile.
#[derive(Debug, Serialize)]
pub struct UserDetailResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub location: String,
    pub description: String,
    pub occupation: String,
}

impl From<user::Model> for UserDetailResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            location: user.location,
            description: user.description,
            occupation: user.occupation,
        }
    }
}

/// Photo and comment counts for one user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCountsResponse {
    pub photo_count: u64,
    pub comment_count: u64,
}

/// Stub of the photo a comment belongs to.
#[derive(Debug, Serialize)]
pub struct PhotoRef {
    pub id: String,
    pub file_name: String,
    pub user_id: String,
}

/// One comment authored by the requested user.
#[derive(Debug, Serialize)]
pub struct UserCommentResponse {
    pub id: String,
    pub comment: String,
    pub date_time: chrono::DateTime<chrono::FixedOffset>,
    pub photo: PhotoRef,
}

/// List all users in registration order.
async fn list_users(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserStub>>> {
    let users = state.user_service.list().await?;

    Ok(Json(users.into_iter().map(UserStub::from).collect()))
}

/// Get one user's profile.
async fn get_user(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserDetailResponse>> {
    let user = state.user_service.get(&id).await?;

    Ok(Json(user.into()))
}

/// Get photo and comment counts for one user.
async fn comment_counts(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CommentCountsResponse>> {
    let counts = state.photo_service.comment_counts(&id).await?;

    Ok(Json(CommentCountsResponse {
        photo_count: counts.photo_count,
        comment_count: counts.comment_count,
    }))
}

/// Get all comments authored by one user, each with its photo.
async fn comments_of_user(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<UserCommentResponse>>> {
    let comments = state.photo_service.comments_of_user(&id).await?;

    Ok(Json(
        comments
            .into_iter()
            .map(|c| UserCommentResponse {
                id: c.comment.id,
                comment: c.comment.comment,
                date_time: c.comment.date_time,
                photo: PhotoRef {
                    id: c.photo_id,
                    file_name: c.file_name,
                    user_id: c.owner_id,
                },
            })
            .collect(),
    ))
}

/// Create the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/list", get(list_users))
        .route("/user/{id}", get(get_user))
        .route("/user/{id}/commentCounts", get(comment_counts))
        .route("/commentsOfUser/{id}", get(comments_of_user))
}
