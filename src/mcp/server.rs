//! TriFit MCP Server Implementation
//!
//! Implements the MCP server with all TriFit tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::{ActivityLevel, Gender, Goal, MealType, ProfileUpdate};
use crate::store::StateStore;
use crate::tools::status::StatusTracker;
use crate::tools::{dashboard, fasting, nutrition, profile, workouts, Clock};

/// TriFit MCP Service
#[derive(Clone)]
pub struct TrifitService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    store: StateStore,
    tool_router: ToolRouter<TrifitService>,
}

impl TrifitService {
    pub fn new(database_path: PathBuf, store: StateStore) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            store,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn parse_meal(meal: Option<&str>) -> Result<Option<MealType>, McpError> {
    meal.map(|m| {
        MealType::from_str(m).ok_or_else(|| {
            McpError::invalid_params(
                format!("Unknown meal '{}': use Breakfast, Lunch, Dinner or Snack", m),
                None,
            )
        })
    })
    .transpose()
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProfileParams {
    /// Age in years
    pub age: Option<u32>,
    /// Current weight in pounds
    pub weight: Option<f64>,
    /// Target weight in pounds
    pub target_weight: Option<f64>,
    /// Height in inches
    pub height: Option<f64>,
    /// "male" or "female"
    pub gender: Option<String>,
    /// sedentary, light, moderate, active or very_active
    pub activity_level: Option<String>,
    /// cut, maintain or bulk
    pub goal: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecordWeightParams {
    /// Weight in pounds
    pub weight: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct HistoryParams {
    /// Maximum number of entries, newest first
    pub limit: Option<usize>,
}

// ============================================================================
// Nutrition Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchFoodsParams {
    pub query: String,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize { 20 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PreviewFoodParams {
    pub food_id: String,
    pub amount: f64,
    /// Unit of the amount; defaults to the food's serving unit
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogFoodParams {
    pub food_id: String,
    pub amount: f64,
    /// Unit of the amount; defaults to the food's serving unit
    pub unit: Option<String>,
    /// Breakfast, Lunch, Dinner or Snack; defaults by time of day
    pub meal: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveFoodEntryParams {
    /// instance_id of the logged entry
    pub instance_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddCustomFoodParams {
    pub name: String,
    /// Calories for one serving
    pub calories: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertUnitsParams {
    pub value: f64,
    pub from: String,
    pub to: String,
}

// ============================================================================
// Fasting / Workout Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetFastingGoalParams {
    /// 13, 16, 20 or 24
    pub hours: u32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListExercisesParams {
    /// Category filter, e.g. "Chest"
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateRoutineParams {
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StartWorkoutParams {
    pub routine_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogSetParams {
    /// 0-based position of the exercise in the routine
    pub exercise_index: usize,
    /// Weight in pounds
    pub weight: f64,
    pub reps: u32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetRestDurationParams {
    /// 30, 60, 90 or 120
    pub seconds: u32,
}

#[tool_router]
impl TrifitService {
    // --- Status ---

    #[tool(description = "Get the current status of the TriFit service including build info, database status, and process information")]
    async fn trifit_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.store);
        to_json(&status)
    }

    #[tool(description = "Get instructions for using the TriFit tools. Call this when starting a session or when unsure which tool to use.")]
    fn usage_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::USAGE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(USAGE_INSTRUCTIONS)]))
    }

    #[tool(description = "Today at a glance: calories against target, weight progress, fasting and workout state")]
    fn get_dashboard(&self) -> Result<CallToolResult, McpError> {
        let result = dashboard::get_dashboard(&self.store, Clock::current())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Profile ---

    #[tool(description = "Get the user profile with BMR, daily calorie target (TDEE) and distance to target weight")]
    fn get_profile(&self) -> Result<CallToolResult, McpError> {
        let result = profile::get_profile(&self.store, Clock::current())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Update profile settings. The daily calorie target is recomputed automatically.")]
    fn update_profile(&self, Parameters(p): Parameters<UpdateProfileParams>) -> Result<CallToolResult, McpError> {
        let gender = p.gender.as_deref().map(|s| {
            Gender::from_str(s).ok_or_else(|| McpError::invalid_params(format!("Unknown gender '{}'", s), None))
        }).transpose()?;
        let activity_level = p.activity_level.as_deref().map(|s| {
            ActivityLevel::from_str(s).ok_or_else(|| McpError::invalid_params(format!("Unknown activity level '{}'", s), None))
        }).transpose()?;
        let goal = p.goal.as_deref().map(|s| {
            Goal::from_str(s).ok_or_else(|| McpError::invalid_params(format!("Unknown goal '{}'", s), None))
        }).transpose()?;

        let changes = ProfileUpdate {
            age: p.age, weight: p.weight, target_weight: p.target_weight, height: p.height,
            gender, activity_level, goal,
        };
        let result = profile::update_profile(&self.store, Clock::current(), changes)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Record a weigh-in in pounds. Updates current weight and weight history.")]
    fn record_weight(&self, Parameters(p): Parameters<RecordWeightParams>) -> Result<CallToolResult, McpError> {
        let result = profile::record_weight(&self.store, Clock::current(), p.weight)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List weigh-ins, newest first")]
    fn list_weight_history(&self, Parameters(p): Parameters<HistoryParams>) -> Result<CallToolResult, McpError> {
        let result = profile::list_weight_history(&self.store, Clock::current(), p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Nutrition ---

    #[tool(description = "Search foods by name across the built-in catalog and custom foods")]
    fn search_foods(&self, Parameters(p): Parameters<SearchFoodsParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::search_foods(&self.store, Clock::current(), &p.query, Some(p.limit))
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Preview calories for an amount of a food without logging it. Also lists the units the food accepts.")]
    fn preview_food(&self, Parameters(p): Parameters<PreviewFoodParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::preview_food(&self.store, Clock::current(), &p.food_id, p.amount, p.unit.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Log an amount of a food to today's food log")]
    fn log_food(&self, Parameters(p): Parameters<LogFoodParams>) -> Result<CallToolResult, McpError> {
        let meal = parse_meal(p.meal.as_deref())?;
        let result = nutrition::log_food(&self.store, Clock::current(), &p.food_id, p.amount, p.unit.as_deref(), meal)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Remove an entry from today's food log by instance_id")]
    fn remove_food_entry(&self, Parameters(p): Parameters<RemoveFoodEntryParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::remove_food_entry(&self.store, Clock::current(), &p.instance_id)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get today's food log grouped by meal with progress against the calorie target")]
    fn get_food_log(&self) -> Result<CallToolResult, McpError> {
        let result = nutrition::get_food_log(&self.store, Clock::current())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Save a custom food given its calories per serving")]
    fn add_custom_food(&self, Parameters(p): Parameters<AddCustomFoodParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::add_custom_food(&self.store, Clock::current(), &p.name, p.calories)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Convert an amount between weight units (oz, g, lb, kg) or between volume units (ml, fl oz, cup, tbsp, tsp, l)")]
    fn convert_units(&self, Parameters(p): Parameters<ConvertUnitsParams>) -> Result<CallToolResult, McpError> {
        to_json(&nutrition::convert_units(p.value, &p.from, &p.to))
    }

    // --- Fasting ---

    #[tool(description = "Get the fasting timer: elapsed time, goal progress and metabolic stage")]
    fn get_fasting_status(&self) -> Result<CallToolResult, McpError> {
        let result = fasting::get_fasting_status(&self.store, Clock::current())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Start a fast now using the selected goal")]
    fn start_fast(&self) -> Result<CallToolResult, McpError> {
        let result = fasting::start_fast(&self.store, Clock::current())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "End the current fast and record it in fasting history")]
    fn end_fast(&self) -> Result<CallToolResult, McpError> {
        let result = fasting::end_fast(&self.store, Clock::current())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Set the fasting goal to 13, 16, 20 or 24 hours. Only allowed between fasts.")]
    fn set_fasting_goal(&self, Parameters(p): Parameters<SetFastingGoalParams>) -> Result<CallToolResult, McpError> {
        let result = fasting::set_fasting_goal(&self.store, Clock::current(), p.hours)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List completed fasts, newest first")]
    fn list_fasting_history(&self, Parameters(p): Parameters<HistoryParams>) -> Result<CallToolResult, McpError> {
        let result = fasting::list_fasting_history(&self.store, Clock::current(), p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Workouts ---

    #[tool(description = "List the built-in exercise catalog, optionally filtered by category")]
    fn list_exercises(&self, Parameters(p): Parameters<ListExercisesParams>) -> Result<CallToolResult, McpError> {
        to_json(&workouts::list_exercises(p.category.as_deref()))
    }

    #[tool(description = "List workout routines with their exercises")]
    fn list_routines(&self) -> Result<CallToolResult, McpError> {
        let result = workouts::list_routines(&self.store, Clock::current())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Create a routine. It starts with Bench Press, Squat and Deadlift.")]
    fn create_routine(&self, Parameters(p): Parameters<CreateRoutineParams>) -> Result<CallToolResult, McpError> {
        let result = workouts::create_routine(&self.store, Clock::current(), &p.name)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Start a workout session from a routine")]
    fn start_workout(&self, Parameters(p): Parameters<StartWorkoutParams>) -> Result<CallToolResult, McpError> {
        let result = workouts::start_workout(&self.store, Clock::current(), &p.routine_id)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Log a completed set in the active workout. Starts the rest countdown.")]
    fn log_set(&self, Parameters(p): Parameters<LogSetParams>) -> Result<CallToolResult, McpError> {
        let result = workouts::log_set(&self.store, Clock::current(), p.exercise_index, p.weight, p.reps)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the active workout with logged sets and the remaining rest time")]
    fn get_active_workout(&self) -> Result<CallToolResult, McpError> {
        let result = workouts::get_active_workout(&self.store, Clock::current())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "End the rest countdown early")]
    fn skip_rest(&self) -> Result<CallToolResult, McpError> {
        let result = workouts::skip_rest(&self.store, Clock::current())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Set the rest countdown to 30, 60, 90 or 120 seconds")]
    fn set_rest_duration(&self, Parameters(p): Parameters<SetRestDurationParams>) -> Result<CallToolResult, McpError> {
        let result = workouts::set_rest_duration(&self.store, Clock::current(), p.seconds)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Finish the active workout and move it into history")]
    fn finish_workout(&self) -> Result<CallToolResult, McpError> {
        let result = workouts::finish_workout(&self.store, Clock::current())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List finished workouts, newest first")]
    fn list_workout_history(&self, Parameters(p): Parameters<HistoryParams>) -> Result<CallToolResult, McpError> {
        let result = workouts::list_workout_history(&self.store, Clock::current(), p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

#[tool_handler]
impl ServerHandler for TrifitService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "trifit".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("TriFit".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "TriFit - nutrition, fasting and workout tracking for one user. \
                 Call usage_instructions first if unsure. \
                 Overview: get_dashboard. \
                 Profile: get_profile, update_profile, record_weight, list_weight_history. \
                 Nutrition: search_foods, preview_food, log_food, remove_food_entry, get_food_log, add_custom_food, convert_units. \
                 Fasting: get_fasting_status, start_fast, end_fast, set_fasting_goal, list_fasting_history. \
                 Workouts: list_exercises, list_routines, create_routine, start_workout, log_set, get_active_workout, \
                 skip_rest, set_rest_duration, finish_workout, list_workout_history."
                    .into(),
            ),
        }
    }
}
