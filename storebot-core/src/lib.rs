//! # storebot-core
//!
//! Core types and shared infrastructure for the storebot workspace: chat message and
//! session types, catalog items, extracted entities, the [`Intent`] and [`Sentiment`]
//! enums, the user preference profile, wire request/response types, the error taxonomy,
//! and tracing initialization. Store-agnostic; used by nlu, catalog, storage and
//! chat-engine.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{EngineError, Result, ValidationError};
pub use logger::init_tracing;
pub use types::{
    BotResponse, CatalogItem, ChatRequest, ChatResponse, Entities, Intent, Message,
    MessageSender, PriceRange, ResponseType, Sentiment, Session, UserPreferenceProfile,
};
