//! Nutrition MCP Tools
//!
//! Food search, intake logging, today's food log and unit conversion.

use serde::Serialize;

use super::Clock;
use crate::error::TrackerError;
use crate::models::{ConsumedItem, FoodItem, MealType};
use crate::nutrition::{
    self, available_units, calories_consumed, convert, default_meal_for_hour, group_by_meal,
    rescale_amount, serving_ratio, DailyProgress, MealGroup, RatioMethod,
};
use crate::store::StateStore;

/// Response for search_foods
#[derive(Debug, Serialize)]
pub struct SearchFoodsResponse {
    pub foods: Vec<FoodItem>,
    pub total: usize,
}

/// Response for preview_food
#[derive(Debug, Serialize)]
pub struct PreviewFoodResponse {
    pub food: FoodItem,
    pub amount: f64,
    pub unit: String,
    pub calories: f64,
    /// How the amount was related to the reference serving
    pub method: RatioMethod,
    pub available_units: Vec<String>,
    pub suggested_meal: MealType,
}

/// Response for log_food
#[derive(Debug, Serialize)]
pub struct LogFoodResponse {
    pub entry: ConsumedItem,
    pub consumed_today: f64,
    pub progress: DailyProgress,
}

/// Response for remove_food_entry
#[derive(Debug, Serialize)]
pub struct RemoveFoodEntryResponse {
    pub success: bool,
    pub removed_instance_id: String,
    pub consumed_today: f64,
}

/// Response for get_food_log
#[derive(Debug, Serialize)]
pub struct FoodLogResponse {
    pub date: String,
    pub meals: Vec<MealGroup>,
    pub entries: usize,
    pub progress: DailyProgress,
}

/// Response for add_custom_food
#[derive(Debug, Serialize)]
pub struct AddCustomFoodResponse {
    pub food: FoodItem,
    pub custom_foods: usize,
}

/// Response for convert_units
#[derive(Debug, Serialize)]
pub struct ConvertUnitsResponse {
    pub value: f64,
    pub from: String,
    pub to: String,
    pub supported: bool,
    pub result: Option<f64>,
    /// Result rounded to one decimal, as shown when switching units
    pub rounded: Option<f64>,
}

/// Search the built-in catalog and custom foods by name
pub fn search_foods(
    store: &StateStore,
    clock: Clock,
    query: &str,
    limit: Option<usize>,
) -> Result<SearchFoodsResponse, String> {
    let state = store
        .load(clock.today)
        .map_err(|e| format!("Failed to load state: {}", e))?;

    let mut foods: Vec<FoodItem> = nutrition::search_foods(&state.nutrition, query);
    let total = foods.len();
    foods.truncate(limit.unwrap_or(usize::MAX));
    Ok(SearchFoodsResponse { foods, total })
}

/// Calories for an amount of a food without logging it
pub fn preview_food(
    store: &StateStore,
    clock: Clock,
    food_id: &str,
    amount: f64,
    unit: Option<&str>,
) -> Result<PreviewFoodResponse, String> {
    let state = store
        .load(clock.today)
        .map_err(|e| format!("Failed to load state: {}", e))?;
    let food = nutrition::find_food(&state.nutrition, food_id)
        .ok_or_else(|| format!("Food not found: {}", food_id))?;

    let unit = unit.unwrap_or(&food.serving_unit).to_string();
    let method = serving_ratio(amount, &unit, food.serving_size, &food.serving_unit).method;

    Ok(PreviewFoodResponse {
        calories: nutrition::preview_calories(&food, amount, &unit),
        available_units: available_units(&food.serving_unit),
        suggested_meal: default_meal_for_hour(clock.hour),
        amount,
        unit,
        method,
        food,
    })
}

/// Log an amount of a food to today's log. The meal slot defaults to the one
/// suggested for the current hour.
pub fn log_food(
    store: &StateStore,
    clock: Clock,
    food_id: &str,
    amount: f64,
    unit: Option<&str>,
    meal: Option<MealType>,
) -> Result<LogFoodResponse, String> {
    let meal = meal.unwrap_or_else(|| default_meal_for_hour(clock.hour));
    let mut logged = None;

    let state = store
        .update(clock.today, |state| {
            let food = nutrition::find_food(&state.nutrition, food_id)
                .ok_or_else(|| TrackerError::FoodNotFound(food_id.to_string()))?;
            let unit = unit.unwrap_or(&food.serving_unit);
            let item = nutrition::log_consumption(&food, amount, unit, meal)?;
            logged = Some(item.clone());

            let mut next = state.clone();
            next.nutrition = nutrition::add_consumed(&state.nutrition, item);
            Ok(next)
        })
        .map_err(|e| format!("Failed to log food: {}", e))?;

    let entry = logged.ok_or_else(|| "Failed to log food: no entry created".to_string())?;
    let consumed_today = calories_consumed(&state.nutrition.consumed);
    tracing::info!(
        food = %entry.food.name,
        calories = entry.food.calories,
        meal = meal.as_str(),
        "Food logged"
    );

    Ok(LogFoodResponse {
        entry,
        consumed_today,
        progress: DailyProgress::new(consumed_today, state.user.tdee),
    })
}

pub fn remove_food_entry(
    store: &StateStore,
    clock: Clock,
    instance_id: &str,
) -> Result<RemoveFoodEntryResponse, String> {
    let state = store
        .update(clock.today, |state| {
            let mut next = state.clone();
            next.nutrition = nutrition::remove_consumed(&state.nutrition, instance_id)?;
            Ok(next)
        })
        .map_err(|e| format!("Failed to remove food entry: {}", e))?;

    Ok(RemoveFoodEntryResponse {
        success: true,
        removed_instance_id: instance_id.to_string(),
        consumed_today: calories_consumed(&state.nutrition.consumed),
    })
}

/// Today's log grouped by meal, with progress against the energy target
pub fn get_food_log(store: &StateStore, clock: Clock) -> Result<FoodLogResponse, String> {
    let state = store
        .load(clock.today)
        .map_err(|e| format!("Failed to load state: {}", e))?;

    let consumed = &state.nutrition.consumed;
    Ok(FoodLogResponse {
        date: state.nutrition.last_reset_date.to_string(),
        meals: group_by_meal(consumed),
        entries: consumed.len(),
        progress: DailyProgress::new(calories_consumed(consumed), state.user.tdee),
    })
}

pub fn add_custom_food(
    store: &StateStore,
    clock: Clock,
    name: &str,
    calories: f64,
) -> Result<AddCustomFoodResponse, String> {
    let mut created = None;
    let state = store
        .update(clock.today, |state| {
            let (updated, food) = nutrition::add_custom_food(&state.nutrition, name, calories)?;
            created = Some(food);
            let mut next = state.clone();
            next.nutrition = updated;
            Ok(next)
        })
        .map_err(|e| format!("Failed to add custom food: {}", e))?;

    let food = created.ok_or_else(|| "Failed to add custom food: nothing created".to_string())?;
    Ok(AddCustomFoodResponse {
        food,
        custom_foods: state.nutrition.custom_foods.len(),
    })
}

pub fn convert_units(value: f64, from: &str, to: &str) -> ConvertUnitsResponse {
    let result = convert(value, from, to);
    ConvertUnitsResponse {
        value,
        from: from.to_string(),
        to: to.to_string(),
        supported: result.is_some(),
        rounded: result.map(|_| rescale_amount(value, from, to)),
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{clock, store};

    #[test]
    fn test_log_rice_in_cups_and_fluid_ounces() {
        let store = store();
        let two_cups = log_food(&store, clock(12, 0), "f2", 2.0, Some("cup"), None).unwrap();
        assert_eq!(two_cups.entry.food.calories, 410.0);
        assert_eq!(two_cups.entry.meal, MealType::Lunch);

        let eight_oz =
            log_food(&store, clock(19, 0), "f2", 8.0, Some("fl oz"), Some(MealType::Dinner))
                .unwrap();
        assert_eq!(eight_oz.entry.food.calories, 205.0);
        assert_eq!(eight_oz.consumed_today, 615.0);

        let log = get_food_log(&store, clock(20, 0)).unwrap();
        assert_eq!(log.entries, 2);
        assert_eq!(log.meals[1].calories, 410.0);
        assert_eq!(log.meals[2].calories, 205.0);
        assert_eq!(log.progress.remaining, 2139.0 - 615.0);
    }

    #[test]
    fn test_log_rejects_bad_input_without_saving() {
        let store = store();
        assert!(log_food(&store, clock(8, 0), "f2", 0.0, None, None).is_err());
        let err = log_food(&store, clock(8, 0), "nope", 1.0, None, None).unwrap_err();
        assert!(err.contains("Food not found"));
        assert_eq!(get_food_log(&store, clock(8, 0)).unwrap().entries, 0);
    }

    #[test]
    fn test_remove_entry() {
        let store = store();
        let logged = log_food(&store, clock(8, 0), "f2", 1.0, None, None).unwrap();
        let removed = remove_food_entry(&store, clock(8, 5), &logged.entry.instance_id).unwrap();
        assert_eq!(removed.consumed_today, 0.0);
        assert!(remove_food_entry(&store, clock(8, 5), &logged.entry.instance_id).is_err());
    }

    #[test]
    fn test_legacy_entry_removable_by_listed_id() {
        let store = store();
        store
            .database()
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO app_state (key, value) VALUES (?1, ?2)",
                    rusqlite::params![
                        crate::store::STATE_KEY,
                        r#"{"nutrition":{"consumed":[{"id":"f2","name":"White Rice (Cooked)",
                            "calories":205,"servingSize":1,"servingUnit":"cup"}],
                            "lastResetDate":"2026-08-12"}}"#
                    ],
                )?;
                Ok(())
            })
            .unwrap();

        let log = get_food_log(&store, clock(9, 0)).unwrap();
        assert_eq!(log.entries, 1);
        let id = log.meals[3].items[0].instance_id.clone();

        assert_eq!(get_food_log(&store, clock(9, 1)).unwrap().meals[3].items[0].instance_id, id);
        let removed = remove_food_entry(&store, clock(9, 2), &id).unwrap();
        assert_eq!(removed.consumed_today, 0.0);
    }

    #[test]
    fn test_preview() {
        let preview = preview_food(&store(), clock(7, 0), "f2", 0.5, None).unwrap();
        assert_eq!(preview.calories, 103.0);
        assert_eq!(preview.unit, "cup");
        assert_eq!(preview.method, RatioMethod::Converted);
        assert_eq!(preview.suggested_meal, MealType::Breakfast);
        assert!(preview.available_units.contains(&"tbsp".to_string()));
    }

    #[test]
    fn test_custom_food_is_searchable_and_loggable() {
        let store = store();
        let added = add_custom_food(&store, clock(15, 0), "Grandma's Pie", 420.0).unwrap();
        assert_eq!(added.custom_foods, 1);

        let found = search_foods(&store, clock(15, 0), "grandma", None).unwrap();
        assert_eq!(found.total, 1);

        let page = search_foods(&store, clock(15, 0), "", Some(2)).unwrap();
        assert_eq!(page.foods.len(), 2);
        assert!(page.total > 2);

        let logged = log_food(&store, clock(22, 0), &added.food.id, 2.0, None, None).unwrap();
        assert_eq!(logged.entry.food.calories, 840.0);
        assert_eq!(logged.entry.meal, MealType::Snack);
    }

    #[test]
    fn test_convert_units() {
        let grams = convert_units(4.0, "oz", "g");
        assert!(grams.supported);
        assert_eq!(grams.rounded, Some(113.4));

        let mixed = convert_units(5.0, "cup", "lb");
        assert!(!mixed.supported);
        assert_eq!(mixed.result, None);
    }
}
