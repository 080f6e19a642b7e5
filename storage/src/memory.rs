//! In-memory session and profile stores for tests, the CLI default, and hosts that
//! keep preferences client-side. Data is lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use storebot_core::{Message, Session, UserPreferenceProfile};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::profile_store::ProfileStore;
use crate::session_store::SessionStore;

/// Thread-safe in-memory session log.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(
        &self,
        session_id: &str,
        user_id: Option<&str>,
    ) -> Result<Session, StorageError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id, user_id.map(str::to_string)));
        Ok(session.clone())
    }

    async fn append_message(
        &self,
        session_id: &str,
        message: &Message,
    ) -> Result<(), StorageError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| StorageError::NotFound(format!("session {session_id}")))?;
        session.messages.push(message.clone());
        session.updated_at = Utc::now();
        Ok(())
    }

    async fn get(&self, session_id: &str) -> Result<Option<Session>, StorageError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned())
    }
}

/// Thread-safe in-memory profile store. Writers are serialized by the lock; the
/// learner's merge rules commute, so interleaved updates converge.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<String, UserPreferenceProfile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn load(&self, user_id: &str) -> Result<Option<UserPreferenceProfile>, StorageError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(user_id).cloned())
    }

    async fn save(
        &self,
        user_id: &str,
        profile: &UserPreferenceProfile,
    ) -> Result<(), StorageError> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(user_id.to_string(), profile.clone());
        Ok(())
    }
}
