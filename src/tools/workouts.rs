//! Workout MCP Tools
//!
//! Routines, the active session, logged sets and the rest countdown.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Clock;
use crate::catalog::{self, exercise_name};
use crate::models::{ActiveWorkout, Exercise, Routine, WorkoutSet, WorkoutState, WorkoutStatus};
use crate::store::StateStore;
use crate::tracking::format_elapsed;

/// Routine with exercise names resolved from the catalog
#[derive(Debug, Serialize)]
pub struct RoutineSummary {
    pub id: String,
    pub name: String,
    pub exercises: Vec<ExerciseRef>,
}

#[derive(Debug, Serialize)]
pub struct ExerciseRef {
    pub id: String,
    pub name: String,
}

impl From<&Routine> for RoutineSummary {
    fn from(routine: &Routine) -> Self {
        Self {
            id: routine.id.clone(),
            name: routine.name.clone(),
            exercises: routine
                .exercises
                .iter()
                .map(|id| ExerciseRef {
                    id: id.clone(),
                    name: exercise_name(id),
                })
                .collect(),
        }
    }
}

/// Response for list_routines
#[derive(Debug, Serialize)]
pub struct ListRoutinesResponse {
    pub routines: Vec<RoutineSummary>,
    pub total: usize,
}

/// Response for list_exercises
#[derive(Debug, Serialize)]
pub struct ListExercisesResponse {
    pub exercises: Vec<Exercise>,
    pub total: usize,
}

/// Sets logged against one exercise of a session
#[derive(Debug, Serialize)]
pub struct SessionExercise {
    pub index: usize,
    pub exercise_id: String,
    pub name: String,
    pub sets: Vec<WorkoutSet>,
}

/// A session, active or finished
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub routine_id: String,
    pub routine_name: Option<String>,
    pub status: WorkoutStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub elapsed: String,
    pub total_sets: usize,
    pub volume: f64,
    pub exercises: Vec<SessionExercise>,
}

impl SessionSummary {
    fn new(workout: &ActiveWorkout, workouts: &WorkoutState, now: DateTime<Utc>) -> Self {
        Self {
            routine_id: workout.routine_id.clone(),
            routine_name: workouts
                .find_routine(&workout.routine_id)
                .map(|r| r.name.clone()),
            status: workout.status,
            start_time: workout.start_time,
            end_time: workout.end_time,
            elapsed: format_elapsed(workout.elapsed_ms(now)),
            total_sets: workout.exercises.iter().map(|e| e.sets.len()).sum(),
            volume: workout.volume(),
            exercises: workout
                .exercises
                .iter()
                .enumerate()
                .map(|(index, e)| SessionExercise {
                    index,
                    exercise_id: e.exercise_id.clone(),
                    name: exercise_name(&e.exercise_id),
                    sets: e.sets.clone(),
                })
                .collect(),
        }
    }
}

/// Response for get_active_workout and the tools that change the session
#[derive(Debug, Serialize)]
pub struct ActiveWorkoutResponse {
    pub workout: Option<SessionSummary>,
    pub rest_seconds: u32,
    /// Seconds left on the rest countdown, absent when not resting
    pub rest_remaining: Option<u32>,
}

impl ActiveWorkoutResponse {
    fn new(workouts: &WorkoutState, now: DateTime<Utc>) -> Self {
        Self {
            workout: workouts
                .active_workout
                .as_ref()
                .map(|w| SessionSummary::new(w, workouts, now)),
            rest_seconds: workouts.rest_seconds,
            rest_remaining: workouts.rest_remaining(now),
        }
    }
}

/// Response for list_workout_history
#[derive(Debug, Serialize)]
pub struct WorkoutHistoryResponse {
    pub workouts: Vec<SessionSummary>,
    pub total: usize,
}

pub fn list_routines(store: &StateStore, clock: Clock) -> Result<ListRoutinesResponse, String> {
    let state = store
        .load(clock.today)
        .map_err(|e| format!("Failed to load state: {}", e))?;
    let routines: Vec<RoutineSummary> = state
        .workouts
        .routines
        .iter()
        .map(RoutineSummary::from)
        .collect();
    let total = routines.len();
    Ok(ListRoutinesResponse { routines, total })
}

/// Built-in exercise catalog, optionally narrowed to one category
pub fn list_exercises(category: Option<&str>) -> ListExercisesResponse {
    let exercises: Vec<Exercise> = catalog::exercises()
        .into_iter()
        .filter(|e| category.map_or(true, |c| e.category.eq_ignore_ascii_case(c)))
        .collect();
    let total = exercises.len();
    ListExercisesResponse { exercises, total }
}

pub fn create_routine(
    store: &StateStore,
    clock: Clock,
    name: &str,
) -> Result<RoutineSummary, String> {
    let mut created = None;
    store
        .update(clock.today, |state| {
            let (workouts, routine) = state.workouts.create_routine(name)?;
            created = Some(routine);
            let mut next = state.clone();
            next.workouts = workouts;
            Ok(next)
        })
        .map_err(|e| format!("Failed to create routine: {}", e))?;

    let routine = created.ok_or_else(|| "Failed to create routine: nothing created".to_string())?;
    tracing::info!(id = %routine.id, name = %routine.name, "Routine created");
    Ok(RoutineSummary::from(&routine))
}

pub fn start_workout(
    store: &StateStore,
    clock: Clock,
    routine_id: &str,
) -> Result<ActiveWorkoutResponse, String> {
    mutate(store, clock, "start workout", |workouts| {
        workouts.start_workout(routine_id, clock.now)
    })
}

/// Log a completed set against the exercise at `exercise_index` (0-based)
pub fn log_set(
    store: &StateStore,
    clock: Clock,
    exercise_index: usize,
    weight: f64,
    reps: u32,
) -> Result<ActiveWorkoutResponse, String> {
    mutate(store, clock, "log set", |workouts| {
        workouts.log_set(exercise_index, weight, reps, clock.now)
    })
}

pub fn skip_rest(store: &StateStore, clock: Clock) -> Result<ActiveWorkoutResponse, String> {
    mutate(store, clock, "skip rest", |workouts| Ok(workouts.skip_rest()))
}

pub fn set_rest_duration(
    store: &StateStore,
    clock: Clock,
    seconds: u32,
) -> Result<ActiveWorkoutResponse, String> {
    mutate(store, clock, "set rest duration", |workouts| {
        workouts.set_rest_duration(seconds)
    })
}

/// Finish the session and return it as recorded in history
pub fn finish_workout(store: &StateStore, clock: Clock) -> Result<SessionSummary, String> {
    let state = store
        .update(clock.today, |state| {
            let mut next = state.clone();
            next.workouts = state.workouts.finish_workout(clock.now)?;
            Ok(next)
        })
        .map_err(|e| format!("Failed to finish workout: {}", e))?;

    state
        .workouts
        .history
        .last()
        .map(|w| SessionSummary::new(w, &state.workouts, clock.now))
        .ok_or_else(|| "Failed to finish workout: history is empty".to_string())
}

pub fn get_active_workout(store: &StateStore, clock: Clock) -> Result<ActiveWorkoutResponse, String> {
    let state = store
        .load(clock.today)
        .map_err(|e| format!("Failed to load state: {}", e))?;
    Ok(ActiveWorkoutResponse::new(&state.workouts, clock.now))
}

/// Finished sessions, newest first
pub fn list_workout_history(
    store: &StateStore,
    clock: Clock,
    limit: Option<usize>,
) -> Result<WorkoutHistoryResponse, String> {
    let state = store
        .load(clock.today)
        .map_err(|e| format!("Failed to load state: {}", e))?;

    let total = state.workouts.history.len();
    let workouts: Vec<SessionSummary> = state
        .workouts
        .history
        .iter()
        .rev()
        .take(limit.unwrap_or(usize::MAX))
        .map(|w| SessionSummary::new(w, &state.workouts, clock.now))
        .collect();
    Ok(WorkoutHistoryResponse { workouts, total })
}

fn mutate<F>(
    store: &StateStore,
    clock: Clock,
    action: &str,
    f: F,
) -> Result<ActiveWorkoutResponse, String>
where
    F: FnOnce(&WorkoutState) -> crate::error::TrackerResult<WorkoutState>,
{
    let state = store
        .update(clock.today, |state| {
            let mut next = state.clone();
            next.workouts = f(&state.workouts)?;
            Ok(next)
        })
        .map_err(|e| format!("Failed to {}: {}", action, e))?;
    Ok(ActiveWorkoutResponse::new(&state.workouts, clock.now))
}
