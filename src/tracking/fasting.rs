//! Fasting timer
//!
//! `Idle -> Active` on start, `Active -> Idle` on end. Elapsed time is always
//! derived from the stored start timestamp, never accumulated.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{FastingHistory, FastingState, FASTING_GOAL_PRESETS};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Metabolic stage reached after a number of fasting hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FastingStage {
    Anabolic,
    Catabolic,
    Ketosis,
    Autophagy,
}

impl FastingStage {
    pub const ALL: [FastingStage; 4] = [
        FastingStage::Anabolic,
        FastingStage::Catabolic,
        FastingStage::Ketosis,
        FastingStage::Autophagy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FastingStage::Anabolic => "Anabolic / Digestion",
            FastingStage::Catabolic => "Catabolic / Fat Burning",
            FastingStage::Ketosis => "Ketosis",
            FastingStage::Autophagy => "Autophagy",
        }
    }

    /// Half-open `[start, end)` range of elapsed hours for this stage
    pub fn hours(&self) -> (f64, f64) {
        match self {
            FastingStage::Anabolic => (0.0, 4.0),
            FastingStage::Catabolic => (4.0, 16.0),
            FastingStage::Ketosis => (16.0, 24.0),
            FastingStage::Autophagy => (24.0, f64::INFINITY),
        }
    }

    /// Stage for a number of elapsed hours. Negative values count as zero.
    pub fn for_hours(hours: f64) -> Self {
        if hours >= 24.0 {
            FastingStage::Autophagy
        } else if hours >= 16.0 {
            FastingStage::Ketosis
        } else if hours >= 4.0 {
            FastingStage::Catabolic
        } else {
            FastingStage::Anabolic
        }
    }
}

/// Where the current fast sits relative to one stage
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageStatus {
    Completed,
    Current,
    Upcoming { starts_in_hours: f64 },
}

impl StageStatus {
    pub fn describe(&self) -> String {
        match self {
            StageStatus::Completed => "Completed".to_string(),
            StageStatus::Current => "Current Stage".to_string(),
            StageStatus::Upcoming { starts_in_hours } => {
                format!("Starts in {:.1} hrs", starts_in_hours)
            }
        }
    }
}

/// One row of the metabolic timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub stage: FastingStage,
    pub label: &'static str,
    pub status: StageStatus,
}

/// Every stage with its status for `hours` elapsed
pub fn timeline(hours: f64) -> Vec<TimelineEntry> {
    FastingStage::ALL
        .into_iter()
        .map(|stage| {
            let (start, end) = stage.hours();
            let status = if hours >= end {
                StageStatus::Completed
            } else if hours >= start {
                StageStatus::Current
            } else {
                StageStatus::Upcoming {
                    starts_in_hours: start - hours,
                }
            };
            TimelineEntry {
                stage,
                label: stage.label(),
                status,
            }
        })
        .collect()
}

/// `HH:MM:SS` for a number of elapsed milliseconds
pub fn format_elapsed(elapsed_ms: i64) -> String {
    let total = elapsed_ms.max(0) / 1000;
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

impl FastingState {
    /// Begin a fast at `now` using the selected goal
    pub fn start(&self, now: DateTime<Utc>) -> TrackerResult<Self> {
        if self.is_active {
            return Err(TrackerError::FastAlreadyActive);
        }
        tracing::info!(goal_hours = self.goal_hours, "Fast started");
        Ok(Self {
            is_active: true,
            start_time: Some(now),
            ..self.clone()
        })
    }

    /// End the current fast at `now`, appending it to history
    pub fn end(&self, now: DateTime<Utc>) -> TrackerResult<Self> {
        let start = match (self.is_active, self.start_time) {
            (true, Some(start)) => start,
            // An active flag without a start time ends as a zero-length fast
            (true, None) => now,
            _ => return Err(TrackerError::NoActiveFast),
        };

        let duration_hours = (now - start).num_milliseconds() as f64 / MS_PER_HOUR;
        tracing::info!(duration_hours, "Fast ended");

        let mut history = self.history.clone();
        history.push(FastingHistory {
            start_time: start,
            end_time: now,
            duration_hours,
        });

        Ok(Self {
            is_active: false,
            start_time: None,
            goal_hours: self.goal_hours,
            history,
        })
    }

    /// Pick a goal preset. Only possible between fasts.
    pub fn set_goal(&self, hours: u32) -> TrackerResult<Self> {
        if self.is_active {
            return Err(TrackerError::FastAlreadyActive);
        }
        if !FASTING_GOAL_PRESETS.contains(&hours) {
            return Err(TrackerError::InvalidFastingGoal(hours));
        }
        Ok(Self {
            goal_hours: hours,
            ..self.clone()
        })
    }

    /// Milliseconds since the fast started, 0 when idle
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> i64 {
        match (self.is_active, self.start_time) {
            (true, Some(start)) => (now - start).num_milliseconds().max(0),
            _ => 0,
        }
    }

    pub fn elapsed_hours(&self, now: DateTime<Utc>) -> f64 {
        self.elapsed_ms(now) as f64 / MS_PER_HOUR
    }

    pub fn stage(&self, now: DateTime<Utc>) -> FastingStage {
        FastingStage::for_hours(self.elapsed_hours(now))
    }

    /// Progress toward the goal, capped at 100
    pub fn progress_percent(&self, now: DateTime<Utc>) -> f64 {
        if self.goal_hours == 0 {
            return 0.0;
        }
        (self.elapsed_hours(now) / self.goal_hours as f64 * 100.0).min(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 10, 20, 0, 0).unwrap()
    }

    #[test]
    fn test_stage_boundaries() {
        assert_eq!(FastingStage::for_hours(0.0), FastingStage::Anabolic);
        assert_eq!(FastingStage::for_hours(3.99), FastingStage::Anabolic);
        assert_eq!(FastingStage::for_hours(4.0).label(), "Catabolic / Fat Burning");
        assert_eq!(FastingStage::for_hours(16.0), FastingStage::Ketosis);
        assert_eq!(FastingStage::for_hours(23.99).label(), "Ketosis");
        assert_eq!(FastingStage::for_hours(24.0).label(), "Autophagy");
        assert_eq!(FastingStage::for_hours(100.0), FastingStage::Autophagy);
    }

    #[test]
    fn test_start_and_elapsed() {
        let fasting = FastingState::default().start(t0()).unwrap();
        assert!(fasting.is_active);
        assert_eq!(fasting.start_time, Some(t0()));
        assert_eq!(fasting.goal_hours, 16);

        let later = t0() + Duration::hours(5);
        assert_eq!(fasting.elapsed_hours(later), 5.0);
        assert_eq!(fasting.stage(later), FastingStage::Catabolic);
        assert_eq!(fasting.progress_percent(t0() + Duration::hours(8)), 50.0);
        assert_eq!(fasting.progress_percent(t0() + Duration::hours(40)), 100.0);
    }

    #[test]
    fn test_elapsed_is_zero_when_idle() {
        let fasting = FastingState::default();
        assert_eq!(fasting.elapsed_ms(t0()), 0);
        assert_eq!(fasting.stage(t0()), FastingStage::Anabolic);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let fasting = FastingState::default().start(t0()).unwrap();
        assert_eq!(fasting.start(t0()), Err(TrackerError::FastAlreadyActive));
    }

    #[test]
    fn test_end_appends_history() {
        let started = FastingState::default().start(t0()).unwrap();
        let before = started.history.len();
        let ended = started.end(t0() + Duration::minutes(16 * 60 + 30)).unwrap();

        assert_eq!(ended.history.len(), before + 1);
        assert!(!ended.is_active);
        assert_eq!(ended.start_time, None);

        let record = ended.history.last().unwrap();
        assert_eq!(record.start_time, t0());
        assert_eq!(record.duration_hours, 16.5);
    }

    #[test]
    fn test_end_when_idle_is_rejected() {
        assert_eq!(
            FastingState::default().end(t0()),
            Err(TrackerError::NoActiveFast)
        );
    }

    #[test]
    fn test_set_goal() {
        let fasting = FastingState::default().set_goal(20).unwrap();
        assert_eq!(fasting.goal_hours, 20);
        assert_eq!(
            fasting.set_goal(17),
            Err(TrackerError::InvalidFastingGoal(17))
        );

        // the selected goal carries into the next fast
        let started = fasting.start(t0()).unwrap();
        assert_eq!(started.goal_hours, 20);
        assert_eq!(started.set_goal(24), Err(TrackerError::FastAlreadyActive));
    }

    #[test]
    fn test_timeline() {
        let rows = timeline(5.0);
        assert_eq!(rows[0].status, StageStatus::Completed);
        assert_eq!(rows[1].status, StageStatus::Current);
        assert_eq!(
            rows[2].status,
            StageStatus::Upcoming {
                starts_in_hours: 11.0
            }
        );
        assert_eq!(rows[2].status.describe(), "Starts in 11.0 hrs");
        assert_eq!(rows[3].label, "Autophagy");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(3_723_000), "01:02:03");
        assert_eq!(format_elapsed(-5), "00:00:00");
    }

    #[test]
    fn test_history_serializes_millis() {
        let ended = FastingState::default()
            .start(t0())
            .unwrap()
            .end(t0() + Duration::hours(1))
            .unwrap();
        let json = serde_json::to_value(&ended).unwrap();
        assert_eq!(json["history"][0]["startTime"], t0().timestamp_millis());
        assert_eq!(json["history"][0]["durationHours"], 1.0);
        assert_eq!(json["isActive"], false);
    }
}
