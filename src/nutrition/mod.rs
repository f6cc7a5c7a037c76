//! Nutrition calculation module
//!
//! Unit conversion, intake logging and daily energy estimates.

pub mod converter;
pub mod energy;
pub mod intake;
pub mod units;

pub use converter::{
    available_units, convert, rescale_amount, serving_ratio, RatioMethod, ServingRatio,
};
pub use energy::{basal_metabolic_rate, estimate_daily_energy};
pub use intake::{
    add_consumed, add_custom_food, calories_consumed, default_meal_for_hour, find_food,
    group_by_meal, log_consumption, preview_calories, remove_consumed, search_foods,
    DailyProgress, MealGroup,
};
pub use units::{categorize_unit, grams_per_unit, ml_per_unit, Unit, UnitFamily};
