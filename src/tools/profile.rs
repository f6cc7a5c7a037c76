//! Profile MCP Tools
//!
//! Body metrics, settings and weight logging.

use serde::Serialize;

use super::Clock;
use crate::models::{ActivityLevel, ProfileUpdate, UserProfile, WeightEntry, WeightToGo};
use crate::nutrition::basal_metabolic_rate;
use crate::store::StateStore;

/// Profile with the values derived from it
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub age: u32,
    pub weight: f64,
    pub target_weight: f64,
    pub height: f64,
    pub gender: String,
    pub activity_level: f64,
    pub activity_label: Option<String>,
    pub goal: String,
    pub bmr: i64,
    pub tdee: i64,
    pub weight_to_go: WeightToGo,
    pub weight_entries: usize,
}

impl From<&UserProfile> for ProfileResponse {
    fn from(user: &UserProfile) -> Self {
        Self {
            age: user.age,
            weight: user.weight,
            target_weight: user.target_weight,
            height: user.height,
            gender: user.gender.as_str().to_string(),
            activity_level: user.activity_level,
            activity_label: ActivityLevel::from_multiplier(user.activity_level)
                .map(|level| level.as_str().to_string()),
            goal: user.goal.as_str().to_string(),
            bmr: basal_metabolic_rate(user).round() as i64,
            tdee: user.tdee,
            weight_to_go: user.weight_to_go(),
            weight_entries: user.weight_history.len(),
        }
    }
}

/// Response for list_weight_history
#[derive(Debug, Serialize)]
pub struct WeightHistoryResponse {
    pub entries: Vec<WeightEntry>,
    pub total: usize,
}

pub fn get_profile(store: &StateStore, clock: Clock) -> Result<ProfileResponse, String> {
    let state = store
        .load(clock.today)
        .map_err(|e| format!("Failed to load state: {}", e))?;
    Ok(ProfileResponse::from(&state.user))
}

/// Apply settings changes; the energy target is recomputed
pub fn update_profile(
    store: &StateStore,
    clock: Clock,
    changes: ProfileUpdate,
) -> Result<ProfileResponse, String> {
    let state = store
        .update(clock.today, |state| {
            let mut next = state.clone();
            next.user = state.user.update(&changes)?;
            Ok(next)
        })
        .map_err(|e| format!("Failed to update profile: {}", e))?;

    tracing::info!(tdee = state.user.tdee, "Profile updated");
    Ok(ProfileResponse::from(&state.user))
}

/// Log today's weight
pub fn record_weight(
    store: &StateStore,
    clock: Clock,
    weight: f64,
) -> Result<ProfileResponse, String> {
    let state = store
        .update(clock.today, |state| {
            let mut next = state.clone();
            next.user = state.user.record_weight(weight, clock.now)?;
            Ok(next)
        })
        .map_err(|e| format!("Failed to record weight: {}", e))?;

    tracing::info!(weight, "Weight recorded");
    Ok(ProfileResponse::from(&state.user))
}

/// Weight samples, newest first
pub fn list_weight_history(
    store: &StateStore,
    clock: Clock,
    limit: Option<usize>,
) -> Result<WeightHistoryResponse, String> {
    let state = store
        .load(clock.today)
        .map_err(|e| format!("Failed to load state: {}", e))?;

    let total = state.user.weight_history.len();
    let entries: Vec<WeightEntry> = state
        .user
        .weight_history
        .iter()
        .rev()
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();
    Ok(WeightHistoryResponse { entries, total })
}
