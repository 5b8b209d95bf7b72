//! File storage abstraction for uploaded photos.
//!
//! Uploaded photos land in a single flat directory that the server exposes
//! under a static URL path.

use std::path::PathBuf;

use crate::{AppError, AppResult};

/// Metadata for a stored file.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// File name within the storage directory.
    pub file_name: String,
    /// Public URL the file is served under.
    pub url: String,
    /// File size in bytes.
    pub size: u64,
}

/// Storage backend trait.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store a file under the given name.
    async fn store(&self, file_name: &str, data: &[u8]) -> AppResult<StoredFile>;

    /// Delete a file.
    async fn delete(&self, file_name: &str) -> AppResult<()>;

    /// Get the public URL for a file name.
    fn public_url(&self, file_name: &str) -> String;

    /// Check if a file exists.
    async fn exists(&self, file_name: &str) -> AppResult<bool>;
}

/// Local filesystem storage backend.
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new local storage backend.
    #[must_use]
    pub const fn new(base_path: PathBuf, base_url: String) -> Self {
        Self { base_path, base_url }
    }
}

#[async_trait::async_trait]
impl StorageBackend for LocalStorage {
    async fn store(&self, file_name: &str, data: &[u8]) -> AppResult<StoredFile> {
        let path = self.base_path.join(file_name);

        // Create the images directory if needed
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to create directory: {e}")))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write file: {e}")))?;

        Ok(StoredFile {
            file_name: file_name.to_string(),
            url: self.public_url(file_name),
            size: data.len() as u64,
        })
    }

    async fn delete(&self, file_name: &str) -> AppResult<()> {
        let path = self.base_path.join(file_name);
        if path.exists() {
            tokio::fs::remove_file(&path)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to delete file: {e}")))?;
        }
        Ok(())
    }

    fn public_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), file_name)
    }

    async fn exists(&self, file_name: &str) -> AppResult<bool> {
        let path = self.base_path.join(file_name);
        Ok(path.exists())
    }
}

/// Generate a unique server-side file name for an uploaded photo.
///
/// The millisecond timestamp prefix keeps names collision-free and roughly
/// upload-ordered; the UUID covers uploads within the same millisecond.
#[must_use]
pub fn generate_photo_file_name(original_name: &str) -> String {
    use chrono::Utc;

    let timestamp = Utc::now().timestamp_millis();

    // Extract extension from the original name
    let extension = original_name
        .rfind('.')
        .filter(|&pos| pos > 0 && pos < original_name.len() - 1)
        .map(|pos| &original_name[pos + 1..])
        .filter(|ext| ext.len() <= 10 && !ext.is_empty() && !ext.contains('/'))
        .unwrap_or("bin");

    format!("photo_{}_{}.{}", timestamp, uuid::Uuid::new_v4().simple(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_photo_file_name() {
        let name = generate_photo_file_name("holiday.jpg");
        assert!(name.starts_with("photo_"));
        assert!(name.ends_with(".jpg"));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_generate_photo_file_name_no_extension() {
        let name = generate_photo_file_name("file");
        assert!(name.ends_with(".bin"));
    }

    #[test]
    fn test_generate_photo_file_name_unique() {
        let a = generate_photo_file_name("a.png");
        let b = generate_photo_file_name("a.png");
        assert_ne!(a, b);
    }

    #[test]
    fn test_public_url() {
        let storage = LocalStorage::new(PathBuf::from("./images"), "/images/".to_string());
        assert_eq!(storage.public_url("x.jpg"), "/images/x.jpg");
    }
}
