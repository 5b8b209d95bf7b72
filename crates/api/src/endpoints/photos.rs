//! Photo and comment endpoints.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    routing::{get, post},
};
use photoshare_common::{AppError, AppResult};
use photoshare_core::PhotoWithComments;
use serde::{Deserialize, Serialize};

use super::users::UserStub;
use crate::{extractors::AuthUser, middleware::AppState};

/// A comment with its author expanded.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub comment: String,
    pub date_time: chrono::DateTime<chrono::FixedOffset>,
    /// Author stub, or null when the author no longer resolves.
    pub user: Option<UserStub>,
}

/// A photo with its comment sequence.
#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub id: String,
    pub user_id: String,
    pub file_name: String,
    pub date_time: chrono::DateTime<chrono::FixedOffset>,
    pub comments: Vec<CommentResponse>,
}

impl From<PhotoWithComments> for PhotoResponse {
    fn from(p: PhotoWithComments) -> Self {
        Self {
            id: p.photo.id,
            user_id: p.photo.user_id,
            file_name: p.photo.file_name,
            date_time: p.photo.date_time,
            comments: p
                .comments
                .into_iter()
                .map(|c| CommentResponse {
                    id: c.comment.id,
                    comment: c.comment.comment,
                    date_time: c.comment.date_time,
                    user: c.author.map(UserStub::from),
                })
                .collect(),
        }
    }
}

/// Get a user's photos with expanded comment authors.
async fn photos_of_user(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<PhotoResponse>>> {
    let photos = state.photo_service.photos_of_user(&id).await?;

    Ok(Json(photos.into_iter().map(PhotoResponse::from).collect()))
}

/// New comment request.
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub comment: String,
}

/// Add a comment to a photo. The session user is the author.
async fn add_comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(photo_id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> AppResult<Json<CommentResponse>> {
    let comment = state
        .photo_service
        .add_comment(&photo_id, &user.id, &req.comment)
        .await?;

    Ok(Json(CommentResponse {
        id: comment.id,
        comment: comment.comment,
        date_time: comment.date_time,
        user: Some(user.into()),
    }))
}

/// Upload a photo via multipart form, field `uploadedphoto`.
async fn upload_photo(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<PhotoResponse>> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut original_name = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("uploadedphoto") {
            original_name = field.file_name().unwrap_or_default().to_string();
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .to_vec(),
            );
        }
    }

    let data = file_data.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    let photo = state
        .photo_service
        .add_photo(&user.id, data, &original_name)
        .await?;

    Ok(Json(PhotoResponse {
        id: photo.id,
        user_id: photo.user_id,
        file_name: photo.file_name,
        date_time: photo.date_time,
        comments: Vec::new(),
    }))
}

/// Create the photo router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/photosOfUser/{id}", get(photos_of_user))
        .route("/commentsOfPhoto/{photo_id}", post(add_comment))
        .route("/photos/new", post(upload_photo))
}
