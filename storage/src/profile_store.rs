use async_trait::async_trait;
use storebot_core::UserPreferenceProfile;

use crate::error::StorageError;

/// Preference-profile persistence keyed by user id. Writes are whole-profile upserts;
/// the learner's merge rules are additive and first-write-wins, so concurrent
/// read-modify-write cycles converge without a per-user lock.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load(&self, user_id: &str) -> Result<Option<UserPreferenceProfile>, StorageError>;

    async fn save(
        &self,
        user_id: &str,
        profile: &UserPreferenceProfile,
    ) -> Result<(), StorageError>;
}
