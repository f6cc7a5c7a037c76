//! Domain error types
//!
//! Rejections raised by the pure update functions. A rejected update leaves
//! the state tree untouched.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(f64),

    #[error("Reference serving size must be positive, got {0}")]
    InvalidServing(f64),

    #[error("Invalid set: weight and reps must both be positive (weight {weight}, reps {reps})")]
    InvalidSet { weight: f64, reps: u32 },

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("A fast is already in progress")]
    FastAlreadyActive,

    #[error("No fast is in progress")]
    NoActiveFast,

    #[error("Goal of {0} hours is not one of the presets (13, 16, 20, 24)")]
    InvalidFastingGoal(u32),

    #[error("A workout is already in progress")]
    WorkoutAlreadyActive,

    #[error("No workout is in progress")]
    NoActiveWorkout,

    #[error("Routine not found: {0}")]
    RoutineNotFound(String),

    #[error("Routine name must not be empty")]
    EmptyRoutineName,

    #[error("Exercise index {index} out of range (workout has {count} exercises)")]
    ExerciseIndexOutOfRange { index: usize, count: usize },

    #[error("Rest of {0} seconds is not one of the presets (30, 60, 90, 120)")]
    InvalidRestDuration(u32),

    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("Consumed entry not found: {0}")]
    EntryNotFound(String),

    #[error("Food name must not be empty")]
    EmptyFoodName,
}

pub type TrackerResult<T> = Result<T, TrackerError>;
