//! Application state tree
//!
//! The single tree the state store persists: profile, nutrition log, fasting
//! log and workout log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ConsumedItem, FastingState, FoodItem, UserProfile, WorkoutState};

/// Current shape version of the persisted tree
pub const SCHEMA_VERSION: u32 = 3;

/// Today's food log. Cleared when the calendar day changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionState {
    /// Newest first
    pub consumed: Vec<ConsumedItem>,
    #[serde(default)]
    pub custom_foods: Vec<FoodItem>,
    pub last_reset_date: NaiveDate,
}

impl NutritionState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            consumed: Vec::new(),
            custom_foods: Vec::new(),
            last_reset_date: today,
        }
    }

    /// Clear the consumed log if it was started on an earlier day.
    /// Returns true when a reset happened.
    pub fn reset_if_stale(&mut self, today: NaiveDate) -> bool {
        if self.last_reset_date == today {
            return false;
        }
        self.consumed.clear();
        self.last_reset_date = today;
        true
    }
}

/// The whole persisted state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub schema_version: u32,
    pub user: UserProfile,
    pub nutrition: NutritionState,
    pub fasting: FastingState,
    pub workouts: WorkoutState,
}

impl AppState {
    /// Fresh state for a first launch on `today`
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            user: UserProfile::default(),
            nutrition: NutritionState::new(today),
            fasting: FastingState::default(),
            workouts: WorkoutState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealType;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::initial(day(1));
        assert_eq!(state.schema_version, SCHEMA_VERSION);
        assert!(state.nutrition.consumed.is_empty());
        assert_eq!(state.nutrition.last_reset_date, day(1));
        assert!(!state.fasting.is_active);
        assert_eq!(state.fasting.goal_hours, 16);
        assert_eq!(state.workouts.routines.len(), 2);
        assert!(state.workouts.active_workout.is_none());
    }

    #[test]
    fn test_reset_if_stale() {
        let mut nutrition = NutritionState::new(day(1));
        nutrition.consumed.push(ConsumedItem {
            food: FoodItem::new("f7", "Banana", 105.0, 1.0, "medium"),
            meal: MealType::Snack,
            instance_id: "x".into(),
        });

        assert!(!nutrition.reset_if_stale(day(1)));
        assert_eq!(nutrition.consumed.len(), 1);

        assert!(nutrition.reset_if_stale(day(2)));
        assert!(nutrition.consumed.is_empty());
        assert_eq!(nutrition.last_reset_date, day(2));
    }

    #[test]
    fn test_state_layout() {
        let json = serde_json::to_value(AppState::initial(day(3))).unwrap();
        assert_eq!(json["nutrition"]["lastResetDate"], "2026-05-03");
        assert_eq!(json["fasting"]["startTime"], serde_json::Value::Null);
        assert_eq!(json["fasting"]["goalHours"], 16);
        assert_eq!(json["workouts"]["activeWorkout"], serde_json::Value::Null);
        assert_eq!(json["workouts"]["routines"][0]["exercises"][3], "e14");
    }
}
