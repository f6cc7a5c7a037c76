//! Fasting MCP Tools
//!
//! Start and end fasts, pick a goal, and read the live timer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Clock;
use crate::models::{FastingHistory, FastingState};
use crate::store::StateStore;
use crate::tracking::{format_elapsed, timeline};

/// One metabolic stage as seen from the current fast
#[derive(Debug, Serialize)]
pub struct StageRow {
    pub label: &'static str,
    pub status: String,
}

/// Live view of the fasting timer
#[derive(Debug, Serialize)]
pub struct FastingStatusResponse {
    pub is_active: bool,
    pub start_time: Option<DateTime<Utc>>,
    pub goal_hours: u32,
    pub elapsed: String,
    pub elapsed_hours: f64,
    pub progress_percent: f64,
    pub stage: &'static str,
    pub timeline: Vec<StageRow>,
    pub completed_fasts: usize,
}

impl FastingStatusResponse {
    fn new(fasting: &FastingState, now: DateTime<Utc>) -> Self {
        let elapsed_hours = fasting.elapsed_hours(now);
        Self {
            is_active: fasting.is_active,
            start_time: fasting.start_time,
            goal_hours: fasting.goal_hours,
            elapsed: format_elapsed(fasting.elapsed_ms(now)),
            elapsed_hours,
            progress_percent: fasting.progress_percent(now),
            stage: fasting.stage(now).label(),
            timeline: timeline(elapsed_hours)
                .into_iter()
                .map(|row| StageRow {
                    label: row.label,
                    status: row.status.describe(),
                })
                .collect(),
            completed_fasts: fasting.history.len(),
        }
    }
}

/// Response for end_fast
#[derive(Debug, Serialize)]
pub struct EndFastResponse {
    pub fast: FastingHistory,
    pub goal_hours: u32,
    pub goal_reached: bool,
    pub completed_fasts: usize,
}

/// Response for list_fasting_history
#[derive(Debug, Serialize)]
pub struct FastingHistoryResponse {
    pub fasts: Vec<FastingHistory>,
    pub total: usize,
}

pub fn get_fasting_status(store: &StateStore, clock: Clock) -> Result<FastingStatusResponse, String> {
    let state = store
        .load(clock.today)
        .map_err(|e| format!("Failed to load state: {}", e))?;
    Ok(FastingStatusResponse::new(&state.fasting, clock.now))
}

pub fn start_fast(store: &StateStore, clock: Clock) -> Result<FastingStatusResponse, String> {
    let state = store
        .update(clock.today, |state| {
            let mut next = state.clone();
            next.fasting = state.fasting.start(clock.now)?;
            Ok(next)
        })
        .map_err(|e| format!("Failed to start fast: {}", e))?;
    Ok(FastingStatusResponse::new(&state.fasting, clock.now))
}

/// End the running fast and record it
pub fn end_fast(store: &StateStore, clock: Clock) -> Result<EndFastResponse, String> {
    let state = store
        .update(clock.today, |state| {
            let mut next = state.clone();
            next.fasting = state.fasting.end(clock.now)?;
            Ok(next)
        })
        .map_err(|e| format!("Failed to end fast: {}", e))?;

    let fast = state
        .fasting
        .history
        .last()
        .cloned()
        .ok_or_else(|| "Failed to end fast: history is empty".to_string())?;

    Ok(EndFastResponse {
        goal_reached: fast.duration_hours >= state.fasting.goal_hours as f64,
        goal_hours: state.fasting.goal_hours,
        completed_fasts: state.fasting.history.len(),
        fast,
    })
}

pub fn set_fasting_goal(
    store: &StateStore,
    clock: Clock,
    hours: u32,
) -> Result<FastingStatusResponse, String> {
    let state = store
        .update(clock.today, |state| {
            let mut next = state.clone();
            next.fasting = state.fasting.set_goal(hours)?;
            Ok(next)
        })
        .map_err(|e| format!("Failed to set fasting goal: {}", e))?;
    Ok(FastingStatusResponse::new(&state.fasting, clock.now))
}

/// Completed fasts, newest first
pub fn list_fasting_history(
    store: &StateStore,
    clock: Clock,
    limit: Option<usize>,
) -> Result<FastingHistoryResponse, String> {
    let state = store
        .load(clock.today)
        .map_err(|e| format!("Failed to load state: {}", e))?;

    let total = state.fasting.history.len();
    let fasts: Vec<FastingHistory> = state
        .fasting
        .history
        .iter()
        .rev()
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();
    Ok(FastingHistoryResponse { fasts, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{clock, store};

    #[test]
    fn test_fast_lifecycle() {
        let store = store();
        let started = start_fast(&store, clock(2, 0)).unwrap();
        assert!(started.is_active);
        assert_eq!(started.elapsed, "00:00:00");

        let status = get_fasting_status(&store, clock(8, 30)).unwrap();
        assert_eq!(status.elapsed, "06:30:00");
        assert_eq!(status.stage, "Catabolic / Fat Burning");
        assert_eq!(status.timeline[0].status, "Completed");
        assert_eq!(status.timeline[1].status, "Current Stage");
        assert_eq!(status.timeline[2].status, "Starts in 9.5 hrs");

        let ended = end_fast(&store, clock(18, 0)).unwrap();
        assert_eq!(ended.fast.duration_hours, 16.0);
        assert!(ended.goal_reached);
        assert_eq!(ended.completed_fasts, 1);

        let idle = get_fasting_status(&store, clock(19, 0)).unwrap();
        assert!(!idle.is_active);
        assert_eq!(idle.start_time, None);
        assert_eq!(idle.elapsed_hours, 0.0);

        let history = list_fasting_history(&store, clock(19, 0), None).unwrap();
        assert_eq!(history.total, 1);
    }

    #[test]
    fn test_invalid_transitions_are_reported() {
        let store = store();
        assert!(end_fast(&store, clock(1, 0)).unwrap_err().contains("No fast"));
        start_fast(&store, clock(1, 0)).unwrap();
        assert!(start_fast(&store, clock(2, 0))
            .unwrap_err()
            .contains("already in progress"));
    }

    #[test]
    fn test_set_goal() {
        let store = store();
        assert_eq!(set_fasting_goal(&store, clock(9, 0), 20).unwrap().goal_hours, 20);
        assert!(set_fasting_goal(&store, clock(9, 0), 18).is_err());
        assert_eq!(get_fasting_status(&store, clock(9, 0)).unwrap().goal_hours, 20);
    }
}
