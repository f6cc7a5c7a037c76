//! Workout session tracker
//!
//! `NoActiveWorkout -> InProgress` on start, back on finish. Logging a set
//! starts a rest countdown that is recomputed from its start timestamp.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    ActiveExercise, ActiveWorkout, RestTimer, Routine, WorkoutSet, WorkoutState, WorkoutStatus,
    REST_PRESETS,
};

/// Exercises a new routine starts with
pub const DEFAULT_ROUTINE_TEMPLATE: [&str; 3] = ["e1", "e2", "e3"];

impl RestTimer {
    /// Whole seconds left, never negative
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> u32 {
        let elapsed_ms = (now - self.started_at).num_milliseconds().max(0);
        let left_ms = self.duration_seconds as i64 * 1000 - elapsed_ms;
        if left_ms <= 0 {
            0
        } else {
            // round up so a countdown reads 60 until a full second passes
            ((left_ms + 999) / 1000) as u32
        }
    }

    pub fn is_finished(&self, now: DateTime<Utc>) -> bool {
        self.remaining_seconds(now) == 0
    }
}

impl WorkoutState {
    pub fn find_routine(&self, routine_id: &str) -> Option<&Routine> {
        self.routines.iter().find(|r| r.id == routine_id)
    }

    /// Begin a session of `routine_id`, one empty set list per exercise
    pub fn start_workout(&self, routine_id: &str, now: DateTime<Utc>) -> TrackerResult<Self> {
        if self.active_workout.is_some() {
            return Err(TrackerError::WorkoutAlreadyActive);
        }
        let routine = self
            .find_routine(routine_id)
            .ok_or_else(|| TrackerError::RoutineNotFound(routine_id.to_string()))?;

        let exercises = routine
            .exercises
            .iter()
            .map(|exercise_id| ActiveExercise {
                exercise_id: exercise_id.clone(),
                sets: Vec::new(),
            })
            .collect();

        tracing::info!(routine_id, routine = %routine.name, "Workout started");

        Ok(Self {
            active_workout: Some(ActiveWorkout {
                routine_id: routine.id.clone(),
                start_time: now,
                exercises,
                status: WorkoutStatus::Active,
                end_time: None,
            }),
            rest: None,
            ..self.clone()
        })
    }

    /// Append a completed set to the exercise at `exercise_index` and start
    /// the rest countdown
    pub fn log_set(
        &self,
        exercise_index: usize,
        weight: f64,
        reps: u32,
        now: DateTime<Utc>,
    ) -> TrackerResult<Self> {
        if !(weight.is_finite() && weight > 0.0) || reps == 0 {
            return Err(TrackerError::InvalidSet { weight, reps });
        }
        let mut active = self
            .active_workout
            .clone()
            .ok_or(TrackerError::NoActiveWorkout)?;

        let count = active.exercises.len();
        let slot = active
            .exercises
            .get_mut(exercise_index)
            .ok_or(TrackerError::ExerciseIndexOutOfRange {
                index: exercise_index,
                count,
            })?;

        slot.sets.push(WorkoutSet {
            id: Uuid::new_v4().to_string(),
            weight,
            reps,
            completed: true,
        });

        tracing::debug!(
            exercise = %slot.exercise_id,
            weight,
            reps,
            "Set logged"
        );

        Ok(Self {
            active_workout: Some(active),
            rest: Some(RestTimer {
                started_at: now,
                duration_seconds: self.rest_seconds,
            }),
            ..self.clone()
        })
    }

    /// Seconds left on the rest countdown, `None` when no countdown runs
    pub fn rest_remaining(&self, now: DateTime<Utc>) -> Option<u32> {
        self.rest
            .map(|rest| rest.remaining_seconds(now))
            .filter(|left| *left > 0)
    }

    pub fn skip_rest(&self) -> Self {
        Self {
            rest: None,
            ..self.clone()
        }
    }

    /// Pick a rest preset for future sets
    pub fn set_rest_duration(&self, seconds: u32) -> TrackerResult<Self> {
        if !REST_PRESETS.contains(&seconds) {
            return Err(TrackerError::InvalidRestDuration(seconds));
        }
        Ok(Self {
            rest_seconds: seconds,
            ..self.clone()
        })
    }

    /// Stamp the end time and move the session into history
    pub fn finish_workout(&self, now: DateTime<Utc>) -> TrackerResult<Self> {
        let active = self
            .active_workout
            .clone()
            .ok_or(TrackerError::NoActiveWorkout)?;

        let sets: usize = active.exercises.iter().map(|e| e.sets.len()).sum();
        tracing::info!(routine_id = %active.routine_id, sets, "Workout finished");

        let mut history = self.history.clone();
        history.push(ActiveWorkout {
            status: WorkoutStatus::Finished,
            end_time: Some(now),
            ..active
        });

        Ok(Self {
            history,
            active_workout: None,
            rest: None,
            ..self.clone()
        })
    }

    /// Add a routine seeded with the default exercise template
    pub fn create_routine(&self, name: &str) -> TrackerResult<(Self, Routine)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::EmptyRoutineName);
        }
        let routine = Routine {
            id: format!("r{}", Uuid::new_v4().simple()),
            name: name.to_string(),
            exercises: DEFAULT_ROUTINE_TEMPLATE
                .iter()
                .map(|id| id.to_string())
                .collect(),
        };

        let mut routines = self.routines.clone();
        routines.push(routine.clone());
        Ok((
            Self {
                routines,
                ..self.clone()
            },
            routine,
        ))
    }
}

impl ActiveWorkout {
    /// Elapsed session time in milliseconds, measured to the end time once finished
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> i64 {
        let end = self.end_time.unwrap_or(now);
        (end - self.start_time).num_milliseconds().max(0)
    }

    /// Total weight moved across all sets
    pub fn volume(&self) -> f64 {
        self.exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .map(|s| s.weight * s.reps as f64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 4, 18, 0, 0).unwrap()
    }

    fn started() -> WorkoutState {
        WorkoutState::default().start_workout("r1", t0()).unwrap()
    }

    #[test]
    fn test_start_creates_empty_slots_in_order() {
        let state = started();
        let active = state.active_workout.unwrap();
        let ids: Vec<&str> = active
            .exercises
            .iter()
            .map(|e| e.exercise_id.as_str())
            .collect();
        assert_eq!(ids, vec!["e1", "e2", "e5", "e14"]);
        assert!(active.exercises.iter().all(|e| e.sets.is_empty()));
        assert_eq!(active.status, WorkoutStatus::Active);
        assert_eq!(active.start_time, t0());
    }

    #[test]
    fn test_start_rejections() {
        assert_eq!(
            WorkoutState::default().start_workout("nope", t0()),
            Err(TrackerError::RoutineNotFound("nope".into()))
        );
        assert_eq!(
            started().start_workout("r2", t0()),
            Err(TrackerError::WorkoutAlreadyActive)
        );
    }

    #[test]
    fn test_log_set() {
        let state = started().log_set(1, 135.0, 8, t0()).unwrap();
        let active = state.active_workout.as_ref().unwrap();
        assert!(active.exercises[0].sets.is_empty());
        assert_eq!(active.exercises[1].sets.len(), 1);

        let set = &active.exercises[1].sets[0];
        assert_eq!(set.weight, 135.0);
        assert_eq!(set.reps, 8);
        assert!(set.completed);
        assert!(!set.id.is_empty());

        assert_eq!(state.rest.unwrap().duration_seconds, 60);
    }

    #[test]
    fn test_log_set_rejects_invalid_input() {
        let state = started();
        assert_eq!(
            state.log_set(0, 0.0, 5, t0()),
            Err(TrackerError::InvalidSet {
                weight: 0.0,
                reps: 5
            })
        );
        assert!(matches!(
            state.log_set(0, 100.0, 0, t0()),
            Err(TrackerError::InvalidSet { .. })
        ));
        assert_eq!(
            state.log_set(4, 100.0, 5, t0()),
            Err(TrackerError::ExerciseIndexOutOfRange { index: 4, count: 4 })
        );
        assert_eq!(
            WorkoutState::default().log_set(0, 100.0, 5, t0()),
            Err(TrackerError::NoActiveWorkout)
        );
    }

    #[test]
    fn test_rest_countdown() {
        let state = started()
            .set_rest_duration(90)
            .unwrap()
            .log_set(0, 185.0, 5, t0())
            .unwrap();

        assert_eq!(state.rest_remaining(t0()), Some(90));
        assert_eq!(state.rest_remaining(t0() + Duration::seconds(30)), Some(60));
        assert_eq!(
            state.rest_remaining(t0() + Duration::milliseconds(89_500)),
            Some(1)
        );
        assert_eq!(state.rest_remaining(t0() + Duration::seconds(90)), None);
        assert_eq!(state.rest_remaining(t0() + Duration::seconds(500)), None);

        assert_eq!(state.skip_rest().rest, None);
    }

    #[test]
    fn test_set_rest_duration_presets_only() {
        assert_eq!(
            WorkoutState::default().set_rest_duration(45),
            Err(TrackerError::InvalidRestDuration(45))
        );
        let state = WorkoutState::default().set_rest_duration(120).unwrap();
        assert_eq!(state.rest_seconds, 120);
    }

    #[test]
    fn test_finish_moves_session_into_history() {
        let state = started().log_set(0, 95.0, 10, t0()).unwrap();
        let end = t0() + Duration::minutes(45);
        let done = state.finish_workout(end).unwrap();

        assert!(done.active_workout.is_none());
        assert!(done.rest.is_none());
        assert_eq!(done.history.len(), 1);

        let session = &done.history[0];
        assert_eq!(session.status, WorkoutStatus::Finished);
        assert_eq!(session.end_time, Some(end));
        assert_eq!(session.exercises, state.active_workout.unwrap().exercises);
        assert_eq!(session.elapsed_ms(end + Duration::hours(3)), 45 * 60 * 1000);
        assert_eq!(session.volume(), 950.0);

        assert_eq!(
            done.finish_workout(end),
            Err(TrackerError::NoActiveWorkout)
        );
    }

    #[test]
    fn test_create_routine() {
        let (state, routine) = WorkoutState::default()
            .create_routine("  Leg Day ")
            .unwrap();
        assert_eq!(routine.name, "Leg Day");
        assert_eq!(routine.exercises, vec!["e1", "e2", "e3"]);
        assert_eq!(state.routines.len(), 3);
        assert!(state.find_routine(&routine.id).is_some());

        assert_eq!(
            WorkoutState::default().create_routine("   "),
            Err(TrackerError::EmptyRoutineName)
        );
    }
}
