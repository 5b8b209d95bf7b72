//! Test utilities for database operations.
//!
//! Model fixtures shared by the repository, service, and API tests, all of
//! which run against sea-orm's `MockDatabase`.

use chrono::Utc;

use crate::entities::{Comment, photo, user};

/// Build a user model fixture.
#[must_use]
pub fn test_user(id: &str, login_name: &str, first_name: &str, last_name: &str) -> user::Model {
    user::Model {
        id: id.to_string(),
        login_name: login_name.to_string(),
        password_hash: "$argon2id$test".to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        location: "Palo Alto".to_string(),
        description: String::new(),
        occupation: "Photographer".to_string(),
        created_at: Utc::now().into(),
    }
}

/// Build a photo model fixture with the given embedded comments.
///
/// # Panics
///
/// Panics if the comments fail to serialize (never happens for fixtures).
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_photo(id: &str, user_id: &str, file_name: &str, comments: Vec<Comment>) -> photo::Model {
    photo::Model {
        id: id.to_string(),
        user_id: user_id.to_string(),
        file_name: file_name.to_string(),
        date_time: Utc::now().into(),
        comments: serde_json::to_value(comments).unwrap(),
    }
}

/// Build a comment sub-document fixture.
#[must_use]
pub fn test_comment(id: &str, user_id: &str, text: &str) -> Comment {
    Comment {
        id: id.to_string(),
        comment: text.to_string(),
        date_time: Utc::now().into(),
        user_id: user_id.to_string(),
    }
}
