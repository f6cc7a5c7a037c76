//! Data models
//!
//! Rust structs for the persisted state tree.

mod app_state;
mod fasting;
mod food_item;
mod profile;
mod workout;

pub use app_state::{AppState, NutritionState, SCHEMA_VERSION};
pub use fasting::{
    FastingHistory, FastingState, DEFAULT_FASTING_GOAL_HOURS, FASTING_GOAL_PRESETS,
};
pub use food_item::{ConsumedItem, FoodItem, MealType};
pub use profile::{
    ActivityLevel, Gender, Goal, ProfileUpdate, UserProfile, WeightEntry, WeightToGo,
};
pub use workout::{
    ActiveExercise, ActiveWorkout, Exercise, RestTimer, Routine, WorkoutSet, WorkoutState,
    WorkoutStatus, DEFAULT_REST_SECONDS, REST_PRESETS,
};
