use async_trait::async_trait;
use storebot_core::{Message, Session};

use crate::error::StorageError;

/// Session log contract. The engine only ever fetches-or-creates a session and appends
/// messages to it; reads of the full history are for hosts.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session with the given id, creating an empty one (owned by
    /// `user_id`, if any) when it does not exist yet.
    async fn get_or_create(
        &self,
        session_id: &str,
        user_id: Option<&str>,
    ) -> Result<Session, StorageError>;

    /// Appends one message to an existing session and bumps its `updated_at`.
    async fn append_message(
        &self,
        session_id: &str,
        message: &Message,
    ) -> Result<(), StorageError>;

    /// Full session with its ordered message log, or `None` when unknown.
    async fn get(&self, session_id: &str) -> Result<Option<Session>, StorageError>;
}
