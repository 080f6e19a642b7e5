//! SQLite session store: `chat_sessions` and `chat_messages` tables, bootstrapped on
//! construction. Messages are returned in append order.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use storebot_core::{Message, MessageSender, Session};
use tracing::info;
use uuid::Uuid;

use crate::error::StorageError;
use crate::session_store::SessionStore;

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: String,
    user_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    sender: String,
    text: String,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self) -> Message {
        Message {
            text: self.text,
            sender: match self.sender.as_str() {
                "bot" => MessageSender::Bot,
                _ => MessageSender::User,
            },
            timestamp: self.created_at,
        }
    }
}

fn sender_label(sender: MessageSender) -> &'static str {
    match sender {
        MessageSender::User => "user",
        MessageSender::Bot => "bot",
    }
}

#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    /// Opens (creating if missing) the database at `database_url` and bootstraps the
    /// schema.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StorageError::Database(e.to_string()))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    /// Builds the store on an existing pool (shared with other repositories).
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, StorageError> {
        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating session tables if not exist");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chat_sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chat_messages (
                id TEXT PRIMARY KEY,
                session_id TEXT NOT NULL,
                sender TEXT NOT NULL,
                text TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_chat_messages_session_id
                ON chat_messages(session_id);
            CREATE INDEX IF NOT EXISTS idx_chat_messages_created_at
                ON chat_messages(created_at);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load_messages(&self, session_id: &str) -> Result<Vec<Message>, StorageError> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            r#"
            SELECT sender, text, created_at FROM chat_messages
            WHERE session_id = ?
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MessageRow::into_message).collect())
    }

    async fn find_session(&self, session_id: &str) -> Result<Option<SessionRow>, StorageError> {
        let row: Option<SessionRow> = sqlx::query_as(
            "SELECT id, user_id, created_at, updated_at FROM chat_sessions WHERE id = ?",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn get_or_create(
        &self,
        session_id: &str,
        user_id: Option<&str>,
    ) -> Result<Session, StorageError> {
        if let Some(row) = self.find_session(session_id).await? {
            let messages = self.load_messages(session_id).await?;
            return Ok(Session {
                id: row.id,
                user_id: row.user_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
                messages,
            });
        }

        let session = Session::new(session_id, user_id.map(str::to_string));
        sqlx::query(
            "INSERT INTO chat_sessions (id, user_id, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await?;

        info!(session_id = %session.id, "Created chat session");
        Ok(session)
    }

    async fn append_message(
        &self,
        session_id: &str,
        message: &Message,
    ) -> Result<(), StorageError> {
        let touched = sqlx::query("UPDATE chat_sessions SET updated_at = ? WHERE id = ?")
            .bind(message.timestamp)
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        if touched.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("session {session_id}")));
        }

        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, session_id, sender, text, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(session_id)
        .bind(sender_label(message.sender))
        .bind(&message.text)
        .bind(message.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, session_id: &str) -> Result<Option<Session>, StorageError> {
        let Some(row) = self.find_session(session_id).await? else {
            return Ok(None);
        };
        let messages = self.load_messages(session_id).await?;
        Ok(Some(Session {
            id: row.id,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            messages,
        }))
    }
}
