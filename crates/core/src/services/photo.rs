//! Photo service.
//!
//! Read-side aggregation (stitching comment sub-documents to their photo and
//! author) plus the two write paths: comment append and photo upload.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use photoshare_common::{
    AppError, AppResult, IdGenerator, StorageBackend, generate_photo_file_name,
};
use photoshare_db::{
    entities::{Comment, photo, user},
    repositories::{PhotoRepository, UserRepository},
};
use sea_orm::Set;

/// Photo and comment counts for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentCounts {
    /// Number of photos owned by the user.
    pub photo_count: u64,
    /// Number of comments authored by the user, across all photos.
    pub comment_count: u64,
}

/// A comment with its author resolved.
#[derive(Debug, Clone)]
pub struct ResolvedComment {
    /// The comment sub-document.
    pub comment: Comment,
    /// The author, or `None` when the author id no longer resolves.
    pub author: Option<user::Model>,
}

/// A photo with its comment sequence expanded to include authors.
#[derive(Debug, Clone)]
pub struct PhotoWithComments {
    /// The photo row.
    pub photo: photo::Model,
    /// Comments in stored order.
    pub comments: Vec<ResolvedComment>,
}

/// One comment authored by a user, with a stub of the photo it lives on.
#[derive(Debug, Clone)]
pub struct UserCommentRef {
    /// The comment sub-document.
    pub comment: Comment,
    /// ID of the photo the comment belongs to.
    pub photo_id: String,
    /// File name of that photo.
    pub file_name: String,
    /// Owner of that photo.
    pub owner_id: String,
}

/// Photo service for aggregation and uploads.
#[derive(Clone)]
pub struct PhotoService {
    photo_repo: PhotoRepository,
    user_repo: UserRepository,
    storage: Arc<dyn StorageBackend>,
    id_gen: IdGenerator,
}

impl PhotoService {
    /// Create a new photo service.
    #[must_use]
    pub fn new(
        photo_repo: PhotoRepository,
        user_repo: UserRepository,
        storage: Arc<dyn StorageBackend>,
    ) -> Self {
        Self {
            photo_repo,
            user_repo,
            storage,
            id_gen: IdGenerator::new(),
        }
    }

    /// Get a user's photos with every comment's author expanded.
    ///
    /// Authors are batch-resolved: one lookup for all distinct author ids in
    /// the result set, re-associated per comment afterwards. A dangling
    /// author id yields `author: None` instead of failing the request.
    pub async fn photos_of_user(&self, user_id: &str) -> AppResult<Vec<PhotoWithComments>> {
        self.user_repo.get_by_id(user_id).await?;

        let photos = self.photo_repo.find_by_user_id(user_id).await?;

        let mut author_ids: Vec<String> = Vec::new();
        let comment_lists: Vec<Vec<Comment>> = photos
            .iter()
            .map(photo::Model::comment_list)
            .inspect(|comments| {
                for c in comments {
                    if !author_ids.contains(&c.user_id) {
                        author_ids.push(c.user_id.clone());
                    }
                }
            })
            .collect();

        let authors: HashMap<String, user::Model> = self
            .user_repo
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        Ok(photos
            .into_iter()
            .zip(comment_lists)
            .map(|(photo, comments)| PhotoWithComments {
                photo,
                comments: comments
                    .into_iter()
                    .map(|comment| ResolvedComment {
                        author: authors.get(&comment.user_id).cloned(),
                        comment,
                    })
                    .collect(),
            })
            .collect())
    }

    /// Get photo and comment counts for a user.
    ///
    /// The comment count scans every photo's comment sequence.
    pub async fn comment_counts(&self, user_id: &str) -> AppResult<CommentCounts> {
        self.user_repo.get_by_id(user_id).await?;

        let photo_count = self.photo_repo.count_by_user_id(user_id).await?;

        let comment_count = self
            .photo_repo
            .find_all()
            .await?
            .iter()
            .flat_map(photo::Model::comment_list)
            .filter(|c| c.user_id == user_id)
            .count() as u64;

        Ok(CommentCounts {
            photo_count,
            comment_count,
        })
    }

    /// Get every comment authored by a user, with a stub of its photo.
    ///
    /// Scan order: photo upload order, then in-photo comment order. Not
    /// sorted by date.
    pub async fn comments_of_user(&self, user_id: &str) -> AppResult<Vec<UserCommentRef>> {
        self.user_repo.get_by_id(user_id).await?;

        let mut result = Vec::new();
        for photo in self.photo_repo.find_all().await? {
            for comment in photo.comment_list() {
                if comment.user_id == user_id {
                    result.push(UserCommentRef {
                        comment,
                        photo_id: photo.id.clone(),
                        file_name: photo.file_name.clone(),
                        owner_id: photo.user_id.clone(),
                    });
                }
            }
        }

        Ok(result)
    }

    /// Append a comment to a photo.
    ///
    /// Empty or whitespace-only text is rejected before any data access.
    pub async fn add_comment(
        &self,
        photo_id: &str,
        author_id: &str,
        text: &str,
    ) -> AppResult<Comment> {
        if text.trim().is_empty() {
            return Err(AppError::BadRequest("Empty comment not allowed".to_string()));
        }

        let comment = Comment {
            id: self.id_gen.generate(),
            comment: text.to_string(),
            date_time: Utc::now().into(),
            user_id: author_id.to_string(),
        };

        self.photo_repo.append_comment(photo_id, &comment).await?;

        Ok(comment)
    }

    /// Store an uploaded photo and create its record.
    pub async fn add_photo(
        &self,
        owner_id: &str,
        data: Vec<u8>,
        original_name: &str,
    ) -> AppResult<photo::Model> {
        if data.is_empty() {
            return Err(AppError::BadRequest("No file uploaded".to_string()));
        }

        let file_name = generate_photo_file_name(original_name);
        self.storage.store(&file_name, &data).await?;

        let model = photo::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(owner_id.to_string()),
            file_name: Set(file_name),
            date_time: Set(Utc::now().into()),
            comments: Set(serde_json::json!([])),
        };

        self.photo_repo.create(model).await
    }

    /// Count all photos.
    pub async fn count(&self) -> AppResult<u64> {
        self.photo_repo.count().await
    }
}
