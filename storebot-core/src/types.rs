//! Core types: chat messages and sessions, catalog items, extracted entities, intents,
//! sentiment, the user preference profile, and the wire request/response pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Who produced a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Bot,
}

/// A single chat message. Immutable once created; appended to a [`Session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: MessageSender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a user message stamped with the current time.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: MessageSender::User,
            timestamp: Utc::now(),
        }
    }

    /// Creates a bot message stamped with the current time.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: MessageSender::Bot,
            timestamp: Utc::now(),
        }
    }
}

/// A chat session: ordered message log plus ownership metadata. Owned by the session
/// store; the engine only appends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl Session {
    /// Creates an empty session with both timestamps set to now.
    pub fn new(id: impl Into<String>, user_id: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            user_id,
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
        }
    }
}

/// A catalog entry. Read-only to the engine; owned by the catalog store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub rating: f32,
    pub stock: u32,
}

/// A price bound pair. Single-bound phrasings ("under 20") populate `max` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Structured facts extracted from one message. Created fresh per turn; merged into the
/// preference profile, never persisted as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    pub price_range: Option<PriceRange>,
    pub category: Option<String>,
    pub author: Option<String>,
    /// Reserved; always empty in this version.
    pub specific_terms: Vec<String>,
}

/// The coarse-grained purpose assigned to one user message. Exactly one per turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    ProductSearch,
    CategorySearch,
    PriceQuery,
    Availability,
    Recommendation,
    Checkout,
    Help,
    AuthorSearch,
    Thanks,
    General,
}

/// Lexicon-based message polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Durable per-user state accumulated across turns. Mutated only by the preference
/// learner; created empty on first interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferenceProfile {
    /// Insertion-ordered set; additive-only.
    pub preferred_categories: Vec<String>,
    /// First-write-wins per bound.
    pub budget_range: PriceRange,
    /// Most-recent-first, capped at [`UserPreferenceProfile::MAX_SEARCHES`].
    pub last_searches: Vec<String>,
}

impl UserPreferenceProfile {
    pub const MAX_SEARCHES: usize = 10;

    /// True when nothing has been learned yet.
    pub fn is_empty(&self) -> bool {
        self.preferred_categories.is_empty()
            && self.budget_range.min.is_none()
            && self.budget_range.max.is_none()
            && self.last_searches.is_empty()
    }
}

/// Shape of the reply payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Product,
    Suggestions,
}

/// The synthesized reply for one turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotResponse {
    pub message: String,
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<CatalogItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learned_preferences: Option<UserPreferenceProfile>,
}

impl BotResponse {
    /// Plain text reply with no attachments.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response_type: ResponseType::Text,
            products: None,
            suggestions: None,
            sentiment: None,
            entities: None,
            learned_preferences: None,
        }
    }
}

/// One inbound chat exchange request, host-framework-agnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub preferences: Option<UserPreferenceProfile>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ChatRequest {
    /// Bare message request, no session or user context.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: None,
            user_id: None,
            preferences: None,
            timestamp: None,
        }
    }

    /// Rejects requests whose message is empty or whitespace-only. Runs before the
    /// pipeline; everything after this point is total.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.message.trim().is_empty() {
            return Err(ValidationError::MissingMessage);
        }
        Ok(())
    }
}

/// The reply envelope for one turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: BotResponse,
    pub session_id: String,
    pub timestamp: String,
    pub user_preferences_updated: bool,
}
