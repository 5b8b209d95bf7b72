//! Photo repository.

use std::sync::Arc;

use crate::entities::{Comment, Photo, photo};
use photoshare_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};

/// Photo repository for database operations.
#[derive(Clone)]
pub struct PhotoRepository {
    db: Arc<DatabaseConnection>,
}

impl PhotoRepository {
    /// Create a new photo repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a photo by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<photo::Model>> {
        Photo::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a photo by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<photo::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::PhotoNotFound(id.to_string()))
    }

    /// Get a user's photos in upload order.
    pub async fn find_by_user_id(&self, user_id: &str) -> AppResult<Vec<photo::Model>> {
        Photo::find()
            .filter(photo::Column::UserId.eq(user_id))
            .order_by_asc(photo::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all photos in upload order.
    ///
    /// Used by the comment aggregations, which scan every photo's comment
    /// sequence. O(total comments) per call, accepted at this scale.
    pub async fn find_all(&self) -> AppResult<Vec<photo::Model>> {
        Photo::find()
            .order_by_asc(photo::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count photos owned by a user.
    pub async fn count_by_user_id(&self, user_id: &str) -> AppResult<u64> {
        Photo::find()
            .filter(photo::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all photos.
    pub async fn count(&self) -> AppResult<u64> {
        Photo::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new photo.
    pub async fn create(&self, model: photo::ActiveModel) -> AppResult<photo::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Append a comment to a photo's comment sequence.
    ///
    /// Single UPDATE with a JSONB array concat, so concurrent appends rely on
    /// the database's own atomic update semantics (no read-modify-write, no
    /// optimistic-concurrency check).
    pub async fn append_comment(&self, photo_id: &str, comment: &Comment) -> AppResult<()> {
        let appended = serde_json::to_value(std::slice::from_ref(comment))
            .map_err(|e| AppError::Internal(format!("Failed to encode comment: {e}")))?;

        let result = Photo::update_many()
            .col_expr(
                photo::Column::Comments,
                Expr::cust_with_values("\"comments\" || ?", [appended]),
            )
            .filter(photo::Column::Id.eq(photo_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::PhotoNotFound(photo_id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{test_comment, test_photo};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_find_by_id_found() {
        let photo = test_photo("p1", "u1", "photo_1_a.jpg", vec![]);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[photo.clone()]])
                .into_connection(),
        );

        let repo = PhotoRepository::new(db);
        let result = repo.find_by_id("p1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().file_name, "photo_1_a.jpg");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<crate::entities::photo::Model>::new()])
                .into_connection(),
        );

        let repo = PhotoRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        assert!(result.is_err());
        match result {
            Err(AppError::PhotoNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected PhotoNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_user_id() {
        let p1 = test_photo("p1", "u1", "photo_1_a.jpg", vec![]);
        let p2 = test_photo("p2", "u1", "photo_2_b.jpg", vec![]);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[p1, p2]])
                .into_connection(),
        );

        let repo = PhotoRepository::new(db);
        let result = repo.find_by_user_id("u1").await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "p1");
    }

    #[tokio::test]
    async fn test_append_comment_updates_one_row() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = PhotoRepository::new(db);
        let comment = test_comment("c1", "u2", "Great light");

        assert!(repo.append_comment("p1", &comment).await.is_ok());
    }

    #[tokio::test]
    async fn test_append_comment_missing_photo() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = PhotoRepository::new(db);
        let comment = test_comment("c1", "u2", "Great light");

        let result = repo.append_comment("missing", &comment).await;
        match result {
            Err(AppError::PhotoNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected PhotoNotFound error"),
        }
    }
}
