//! Dashboard MCP Tool
//!
//! One-call summary of today across all three logs.

use serde::Serialize;

use super::Clock;
use crate::models::WeightToGo;
use crate::nutrition::{calories_consumed, DailyProgress};
use crate::store::StateStore;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub date: String,
    pub calories: DailyProgress,
    pub weight: f64,
    pub target_weight: f64,
    pub weight_to_go: WeightToGo,
    pub fasting_active: bool,
    pub fasting_stage: Option<&'static str>,
    pub fasting_hours: f64,
    pub workout_active: bool,
    pub workouts_completed: usize,
}

pub fn get_dashboard(store: &StateStore, clock: Clock) -> Result<DashboardResponse, String> {
    let state = store
        .load(clock.today)
        .map_err(|e| format!("Failed to load state: {}", e))?;

    let consumed = calories_consumed(&state.nutrition.consumed);
    let fasting = &state.fasting;

    Ok(DashboardResponse {
        date: state.nutrition.last_reset_date.to_string(),
        calories: DailyProgress::new(consumed, state.user.tdee),
        weight: state.user.weight,
        target_weight: state.user.target_weight,
        weight_to_go: state.user.weight_to_go(),
        fasting_active: fasting.is_active,
        fasting_stage: fasting
            .is_active
            .then(|| fasting.stage(clock.now).label()),
        fasting_hours: (fasting.elapsed_hours(clock.now) * 10.0).round() / 10.0,
        workout_active: state.workouts.active_workout.is_some(),
        workouts_completed: state.workouts.history.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{clock, store};
    use crate::tools::{fasting, nutrition};

    #[test]
    fn test_fresh_dashboard() {
        let dash = get_dashboard(&store(), clock(10, 0)).unwrap();
        assert_eq!(dash.date, "2026-08-12");
        assert_eq!(dash.calories.remaining, 2139.0);
        assert_eq!(dash.calories.percent, 0.0);
        assert!(!dash.fasting_active);
        assert_eq!(dash.fasting_stage, None);
    }

    #[test]
    fn test_dashboard_reflects_logs() {
        let store = store();
        fasting::start_fast(&store, clock(0, 0)).unwrap();
        nutrition::log_food(&store, clock(12, 0), "f2", 20.0, Some("cup"), None).unwrap();

        let dash = get_dashboard(&store, clock(17, 15)).unwrap();
        assert_eq!(dash.calories.consumed, 4100.0);
        assert_eq!(dash.calories.remaining, 0.0);
        assert_eq!(dash.calories.percent, 100.0);
        assert!(dash.calories.over);
        assert_eq!(dash.fasting_stage, Some("Ketosis"));
        assert_eq!(dash.fasting_hours, 17.3);
    }
}
