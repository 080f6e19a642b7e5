//! The request pipeline. One `process` call runs the whole turn: validate →
//! classify/extract/estimate → learn → synthesize → persist. Store failures propagate
//! unchanged; everything between the store boundaries is total.

use std::sync::Arc;

use catalog::CatalogStore;
use chrono::Utc;
use storage::{ProfileStore, SessionStore, StorageError};
use storebot_core::{
    ChatRequest, ChatResponse, EngineError, Message, Result, UserPreferenceProfile,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::preferences;
use crate::synthesizer::{synthesize, TurnContext};

fn storage_error(error: StorageError) -> EngineError {
    EngineError::Storage(error.to_string())
}

/// The conversational engine: stateless itself, wired to injected stores. Cheap to
/// clone and share across request handlers.
#[derive(Clone)]
pub struct ChatEngine {
    catalog: Arc<dyn CatalogStore>,
    sessions: Arc<dyn SessionStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl ChatEngine {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        sessions: Arc<dyn SessionStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            catalog,
            sessions,
            profiles,
        }
    }

    /// Runs one full turn and returns the reply envelope.
    ///
    /// The user message and the synthesized reply are appended to the session log, and
    /// the profile is saved when it changed, only after synthesis succeeds — an
    /// abandoned request leaves no partial writes.
    #[instrument(skip(self, request))]
    pub async fn process(&self, request: ChatRequest) -> Result<ChatResponse> {
        request.validate()?;

        let session_id = request
            .session_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let session = self
            .sessions
            .get_or_create(&session_id, request.user_id.as_deref())
            .await
            .map_err(storage_error)?;

        let intent = nlu::classify(&request.message);
        let entities = nlu::extract(&request.message);
        let sentiment = nlu::estimate(&request.message);
        info!(
            session_id = %session.id,
            intent = ?intent,
            sentiment = ?sentiment,
            "step: message understood"
        );

        // The profile to personalize against: caller-supplied, else stored, else empty.
        // Fully anonymous requests (no user id, no preferences) skip learning.
        let base_profile: Option<UserPreferenceProfile> = match (&request.preferences, &request.user_id) {
            (Some(preferences), _) => Some(preferences.clone()),
            (None, Some(user_id)) => Some(
                self.profiles
                    .load(user_id)
                    .await
                    .map_err(storage_error)?
                    .unwrap_or_default(),
            ),
            (None, None) => None,
        };

        let learned = base_profile
            .as_ref()
            .map(|profile| preferences::learn(profile, &request.message, &entities));
        let profile_changed =
            matches!((&base_profile, &learned), (Some(before), Some(after)) if before != after);
        if profile_changed {
            info!(session_id = %session.id, "step: preferences learned");
        }

        let response = synthesize(
            TurnContext {
                message: &request.message,
                intent,
                entities: &entities,
                sentiment,
                profile: base_profile.as_ref(),
                learned: if profile_changed { learned.clone() } else { None },
            },
            self.catalog.as_ref(),
        )
        .await
        .map_err(|error| EngineError::Catalog(error.to_string()))?;

        // Final persistence step: two ordered session records, then the profile.
        self.sessions
            .append_message(&session.id, &Message::user(request.message.as_str()))
            .await
            .map_err(storage_error)?;
        self.sessions
            .append_message(&session.id, &Message::bot(response.message.as_str()))
            .await
            .map_err(storage_error)?;

        if profile_changed {
            if let (Some(user_id), Some(profile)) = (&request.user_id, &learned) {
                self.profiles
                    .save(user_id, profile)
                    .await
                    .map_err(storage_error)?;
            }
        }

        let timestamp = request
            .timestamp
            .unwrap_or_else(|| Utc::now().to_rfc3339());

        Ok(ChatResponse {
            response,
            session_id: session.id,
            timestamp,
            user_preferences_updated: profile_changed,
        })
    }
}
