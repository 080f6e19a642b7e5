//! Preference learning: merges one turn's observations into the profile under
//! monotonic rules — categories are additive-only, budget bounds are first-write-wins,
//! and recent search terms are a capped most-recent-first list.

use storebot_core::{Entities, UserPreferenceProfile};

/// How many normalized tokens of one message feed `last_searches`.
const SEARCH_TERMS_PER_TURN: usize = 3;

/// Returns an updated copy of `profile` with this turn's entities and keywords merged
/// in. The input is never mutated; callers compare input and output to decide whether
/// anything was learned.
pub fn learn(
    profile: &UserPreferenceProfile,
    message: &str,
    entities: &Entities,
) -> UserPreferenceProfile {
    let mut updated = profile.clone();

    if let Some(category) = &entities.category {
        if !updated.preferred_categories.contains(category) {
            updated.preferred_categories.push(category.clone());
        }
    }

    if let Some(range) = &entities.price_range {
        if range.max.is_some() && updated.budget_range.max.is_none() {
            updated.budget_range.max = range.max;
        }
        if range.min.is_some() && updated.budget_range.min.is_none() {
            updated.budget_range.min = range.min;
        }
    }

    for token in nlu::normalize(message).into_iter().take(SEARCH_TERMS_PER_TURN) {
        if !updated.last_searches.contains(&token) {
            updated.last_searches.insert(0, token);
        }
    }
    updated
        .last_searches
        .truncate(UserPreferenceProfile::MAX_SEARCHES);

    updated
}
