//! Session service.
//!
//! Sessions are opaque bearer tokens mapped to user ids behind the
//! [`SessionStore`] trait, so the in-memory store can be swapped for a
//! shared backend without touching the handlers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use photoshare_common::{AppResult, IdGenerator};
use tokio::sync::RwLock;

/// Storage backend for active sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Associate a token with a user id.
    async fn insert(&self, token: &str, user_id: &str) -> AppResult<()>;

    /// Look up the user id for a token.
    async fn get(&self, token: &str) -> AppResult<Option<String>>;

    /// Remove a token. Returns whether it existed.
    async fn remove(&self, token: &str) -> AppResult<bool>;
}

/// In-process session store.
///
/// Sessions do not survive a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, token: &str, user_id: &str) -> AppResult<()> {
        self.sessions
            .write()
            .await
            .insert(token.to_string(), user_id.to_string());
        Ok(())
    }

    async fn get(&self, token: &str) -> AppResult<Option<String>> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> AppResult<bool> {
        Ok(self.sessions.write().await.remove(token).is_some())
    }
}

/// Session service for login, lookup, and logout.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    id_gen: IdGenerator,
}

impl SessionService {
    /// Create a new session service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            id_gen: IdGenerator::new(),
        }
    }

    /// Start a session for a user and return its token.
    pub async fn create(&self, user_id: &str) -> AppResult<String> {
        let token = self.id_gen.generate_token();
        self.store.insert(&token, user_id).await?;
        Ok(token)
    }

    /// Resolve a token to the user id it belongs to, if any.
    pub async fn user_id(&self, token: &str) -> AppResult<Option<String>> {
        self.store.get(token).await
    }

    /// End a session. Returns whether the token was active.
    pub async fn destroy(&self, token: &str) -> AppResult<bool> {
        self.store.remove(token).await
    }
}
