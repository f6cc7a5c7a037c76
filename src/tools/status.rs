//! TriFit Status Tool
//!
//! Runtime status of the service and usage notes for assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::migrations::get_schema_version;
use crate::store::{stored_version_of, StateStore};

/// Usage guide for AI assistants
pub const USAGE_INSTRUCTIONS: &str = r#"
# TriFit Usage Instructions

TriFit keeps one personal log with three parts: nutrition, fasting and workouts.
Every tool reads the current state and saves the whole state back.

## Nutrition

1. `search_foods(query)` to find a food id (built-in catalog first, then custom foods)
2. `preview_food(food_id, amount, unit)` to see calories and the units the food accepts
3. `log_food(food_id, amount, unit, meal)` to add it to today's log

- `unit` defaults to the food's serving unit.
- Weight units (oz, g, lb, kg) convert among themselves, as do volume units
  (ml, fl oz, cup, tbsp, tsp, l). Anything else is read as a number of servings.
- `meal` is Breakfast, Lunch, Dinner or Snack. When omitted it follows the
  time of day: before 11 Breakfast, before 15 Lunch, before 21 Dinner, then Snack.
- The food log clears itself when the local date changes.
- `add_custom_food(name, calories)` saves a food measured in whole servings.
- `remove_food_entry(instance_id)` undoes a log entry.

## Profile

- `update_profile` changes body metrics, activity level and goal. The daily
  calorie target (TDEE) is always recomputed, never set directly.
- `record_weight(weight)` logs a weigh-in in pounds.

## Fasting

- `set_fasting_goal(hours)` picks 13, 16, 20 or 24 hours (only between fasts).
- `start_fast`, then `get_fasting_status` for the timer and metabolic stage,
  then `end_fast` to record it.

## Workouts

- `list_routines`, then `start_workout(routine_id)`.
- `log_set(exercise_index, weight, reps)` uses the 0-based position in the
  routine. Weight and reps must be positive. Each set starts a rest countdown.
- `set_rest_duration(seconds)` picks 30, 60, 90 or 120; `skip_rest` ends the
  countdown early.
- `finish_workout` moves the session into history.

## Quick Reference

| Task | Tool |
|------|------|
| Today at a glance | `get_dashboard` |
| Today's food log | `get_food_log` |
| Convert units | `convert_units` |
| Exercise catalog | `list_exercises` |
| New routine | `create_routine` |
"#;

/// Status information
#[derive(Debug, Serialize)]
pub struct TrifitStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
    pub version: &'static str,
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub database_schema_version: Option<i32>,
    pub state_schema_version: Option<u32>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self, store: &StateStore) -> TrifitStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let database_schema_version = store
            .database()
            .with_conn(get_schema_version)
            .map_err(|e| tracing::warn!("Could not read schema version: {}", e))
            .ok();

        // None until the first save
        let state_schema_version = store
            .raw()
            .map_err(|e| tracing::warn!("Could not read stored state: {}", e))
            .ok()
            .flatten()
            .and_then(|blob| stored_version_of(&blob));

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        TrifitStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            build_profile: build_info.profile,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            database_schema_version,
            state_schema_version,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
