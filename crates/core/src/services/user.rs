//! User service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use photoshare_common::{AppError, AppResult, IdGenerator};
use photoshare_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// User service for registration, authentication, and profile reads.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for registering a new user.
///
/// Required fields default to empty when absent from the request body, so a
/// missing field takes the same blank-field rejection path as an explicit
/// empty string.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserInput {
    #[serde(default)]
    #[validate(length(max = 128))]
    pub login_name: String,

    #[serde(default)]
    #[validate(length(max = 128))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 256))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 256))]
    pub last_name: String,

    #[validate(length(max = 256))]
    pub location: Option<String>,

    #[validate(length(max = 2048))]
    pub description: Option<String>,

    #[validate(length(max = 256))]
    pub occupation: Option<String>,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new user.
    ///
    /// Login name uniqueness is checked here, at creation time; users are
    /// read-only afterwards.
    pub async fn register(&self, input: RegisterUserInput) -> AppResult<user::Model> {
        input.validate()?;

        if input.login_name.trim().is_empty() {
            return Err(AppError::BadRequest("Login name is required".to_string()));
        }
        if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "First and last name are required".to_string(),
            ));
        }
        if input.password.trim().is_empty() {
            return Err(AppError::BadRequest("Password cannot be empty".to_string()));
        }

        if self
            .user_repo
            .find_by_login_name(&input.login_name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Login name already exists".to_string()));
        }

        let password_hash = hash_password(&input.password)?;

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            login_name: Set(input.login_name),
            password_hash: Set(password_hash),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            location: Set(input.location.unwrap_or_default()),
            description: Set(input.description.unwrap_or_default()),
            occupation: Set(input.occupation.unwrap_or_default()),
            created_at: Set(Utc::now().into()),
        };

        self.user_repo.create(model).await
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// Get all users in registration order.
    pub async fn list(&self) -> AppResult<Vec<user::Model>> {
        self.user_repo.find_all().await
    }

    /// Count all users.
    pub async fn count(&self) -> AppResult<u64> {
        self.user_repo.count().await
    }

    /// Authenticate a user by login name and password.
    ///
    /// Both an unknown login name and a wrong password surface as a 400 to
    /// the client, matching the login form's contract.
    pub async fn authenticate(&self, login_name: &str, password: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_login_name(login_name)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid login_name".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::BadRequest("Invalid password".to_string()));
        }

        Ok(user)
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use photoshare_db::test_utils::test_user;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn input(login_name: &str, password: &str, first: &str, last: &str) -> RegisterUserInput {
        RegisterUserInput {
            login_name: login_name.to_string(),
            password: password.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            location: None,
            description: None,
            occupation: None,
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> UserService {
        UserService::new(UserRepository::new(Arc::new(db)))
    }

    // Unit tests for password functions
    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hash.len() > 50);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(verify_password("test_password_123", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hash_password_different_each_time() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
        assert!(verify_password("same_password", &hash1).unwrap());
        assert!(verify_password("same_password", &hash2).unwrap());
    }

    // Registration validation (rejected before any database access, so an
    // empty mock connection is enough)
    #[tokio::test]
    async fn test_register_blank_login_name() {
        let service =
            service_with(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service.register(input("  ", "secret", "Jane", "Doe")).await;
        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Login name is required"),
            _ => panic!("Expected BadRequest error"),
        }
    }

    #[tokio::test]
    async fn test_register_blank_names() {
        let service =
            service_with(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service.register(input("jdoe", "secret", "", "Doe")).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_register_blank_password() {
        let service =
            service_with(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service.register(input("jdoe", "   ", "Jane", "Doe")).await;
        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Password cannot be empty"),
            _ => panic!("Expected BadRequest error"),
        }
    }

    #[tokio::test]
    async fn test_register_absent_field_takes_blank_path() {
        let service =
            service_with(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        // No password key at all: deserializes to an empty string and is
        // rejected like a blank one.
        let input: RegisterUserInput = serde_json::from_value(serde_json::json!({
            "login_name": "jdoe",
            "first_name": "Jane",
            "last_name": "Doe",
        }))
        .unwrap();

        let result = service.register(input).await;
        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Password cannot be empty"),
            _ => panic!("Expected BadRequest error"),
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_login_name_conflicts() {
        let existing = test_user("user1", "jdoe", "Jane", "Doe");
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let result = service.register(input("jdoe", "secret", "Jane", "Doe")).await;
        match result {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, "Login name already exists"),
            _ => panic!("Expected Conflict error"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_unknown_login_name() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let result = service.authenticate("nobody", "secret").await;
        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Invalid login_name"),
            _ => panic!("Expected BadRequest error"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut user = test_user("user1", "jdoe", "Jane", "Doe");
        user.password_hash = hash_password("right-password").unwrap();

        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );

        let result = service.authenticate("jdoe", "wrong-password").await;
        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Invalid password"),
            _ => panic!("Expected BadRequest error"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut user = test_user("user1", "jdoe", "Jane", "Doe");
        user.password_hash = hash_password("right-password").unwrap();

        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );

        let authenticated = service.authenticate("jdoe", "right-password").await.unwrap();
        assert_eq!(authenticated.id, "user1");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let result = service.get("nonexistent").await;
        match result {
            Err(AppError::UserNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected UserNotFound error"),
        }
    }
}
