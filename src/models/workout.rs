//! Workout models
//!
//! Catalog exercises, routines, and the sets logged during a workout session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rest countdown presets, in seconds
pub const REST_PRESETS: [u32; 4] = [30, 60, 90, 120];

/// Rest countdown used until the user picks a preset
pub const DEFAULT_REST_SECONDS: u32 = 60;

/// A catalog exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: String,
}

/// A reusable list of exercises. Exercise ids refer to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub id: String,
    pub name: String,
    pub exercises: Vec<String>,
}

/// One logged set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: String,
    pub weight: f64,
    pub reps: u32,
    pub completed: bool,
}

/// Sets logged against one routine exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveExercise {
    pub exercise_id: String,
    pub sets: Vec<WorkoutSet>,
}

/// Workout session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStatus {
    Active,
    Finished,
}

/// One execution of a routine. Kept in the active slot while in progress and
/// moved into history once finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveWorkout {
    pub routine_id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    pub exercises: Vec<ActiveExercise>,
    pub status: WorkoutStatus,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<DateTime<Utc>>,
}

/// A running rest countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestTimer {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub started_at: DateTime<Utc>,
    pub duration_seconds: u32,
}

/// Workout log: routines, finished sessions, the active session and rest settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutState {
    pub routines: Vec<Routine>,
    #[serde(default)]
    pub history: Vec<ActiveWorkout>,
    #[serde(default)]
    pub active_workout: Option<ActiveWorkout>,
    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: u32,
    #[serde(default)]
    pub rest: Option<RestTimer>,
}

fn default_rest_seconds() -> u32 {
    DEFAULT_REST_SECONDS
}

impl Default for WorkoutState {
    fn default() -> Self {
        Self {
            routines: vec![
                Routine {
                    id: "r1".into(),
                    name: "Full Body A".into(),
                    exercises: vec!["e1".into(), "e2".into(), "e5".into(), "e14".into()],
                },
                Routine {
                    id: "r2".into(),
                    name: "Upper Power".into(),
                    exercises: vec!["e1".into(), "e4".into(), "e7".into(), "e12".into()],
                },
            ],
            history: Vec::new(),
            active_workout: None,
            rest_seconds: DEFAULT_REST_SECONDS,
            rest: None,
        }
    }
}
