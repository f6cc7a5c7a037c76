//! Fasting models
//!
//! The active fast and the record written when a fast ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Goal presets offered when starting a fast, in hours
pub const FASTING_GOAL_PRESETS: [u32; 4] = [13, 16, 20, 24];

/// Goal used until the user picks a preset
pub const DEFAULT_FASTING_GOAL_HOURS: u32 = 16;

/// A completed fast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastingHistory {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end_time: DateTime<Utc>,
    pub duration_hours: f64,
}

/// Fasting log: the current fast (if any) and past fasts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastingState {
    pub is_active: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub start_time: Option<DateTime<Utc>>,
    pub goal_hours: u32,
    #[serde(default)]
    pub history: Vec<FastingHistory>,
}

impl Default for FastingState {
    fn default() -> Self {
        Self {
            is_active: false,
            start_time: None,
            goal_hours: DEFAULT_FASTING_GOAL_HOURS,
            history: Vec::new(),
        }
    }
}
