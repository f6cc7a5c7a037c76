//! Intake logging
//!
//! Turns a catalog food plus a logged amount into a consumed entry, and
//! summarises the day's log against the energy target.

use serde::Serialize;
use uuid::Uuid;

use super::converter::serving_ratio;
use crate::catalog;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{ConsumedItem, FoodItem, MealType, NutritionState};

/// Serving unit given to foods added by name with only a calorie count
pub const CUSTOM_FOOD_UNIT: &str = "serving";

/// Log `amount` of `unit` of `food` under `meal`.
///
/// The logged amount is converted into the food's serving unit when the two
/// units share a family; otherwise it is taken as a multiple of the serving
/// magnitude. Calories are rounded to whole kcal.
pub fn log_consumption(
    food: &FoodItem,
    amount: f64,
    unit: &str,
    meal: MealType,
) -> TrackerResult<ConsumedItem> {
    if !(amount.is_finite() && amount > 0.0) {
        return Err(TrackerError::InvalidAmount(amount));
    }
    if !(food.serving_size.is_finite() && food.serving_size > 0.0) {
        return Err(TrackerError::InvalidServing(food.serving_size));
    }

    let ratio = serving_ratio(amount, unit, food.serving_size, &food.serving_unit).ratio;

    Ok(ConsumedItem {
        food: FoodItem {
            id: food.id.clone(),
            name: food.name.clone(),
            calories: (food.calories * ratio).round(),
            protein: food.protein.map(|g| g * ratio),
            carbs: food.carbs.map(|g| g * ratio),
            fat: food.fat.map(|g| g * ratio),
            serving_size: amount,
            serving_unit: unit.to_string(),
        },
        meal,
        instance_id: Uuid::new_v4().to_string(),
    })
}

/// Calories that logging `amount` of `unit` would add. Invalid amounts preview as 0.
pub fn preview_calories(food: &FoodItem, amount: f64, unit: &str) -> f64 {
    if !(amount.is_finite() && amount > 0.0) || food.serving_size <= 0.0 {
        return 0.0;
    }
    let ratio = serving_ratio(amount, unit, food.serving_size, &food.serving_unit).ratio;
    (food.calories * ratio).round()
}

/// Add a consumed entry to the front of the log
pub fn add_consumed(nutrition: &NutritionState, item: ConsumedItem) -> NutritionState {
    let mut next = nutrition.clone();
    next.consumed.insert(0, item);
    next
}

/// Remove one consumed entry by instance id
pub fn remove_consumed(nutrition: &NutritionState, instance_id: &str) -> TrackerResult<NutritionState> {
    let position = nutrition
        .consumed
        .iter()
        .position(|c| c.instance_id == instance_id)
        .ok_or_else(|| TrackerError::EntryNotFound(instance_id.to_string()))?;

    let mut next = nutrition.clone();
    next.consumed.remove(position);
    Ok(next)
}

/// Save a user-defined food: `calories` per one generic serving
pub fn add_custom_food(
    nutrition: &NutritionState,
    name: &str,
    calories: f64,
) -> TrackerResult<(NutritionState, FoodItem)> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TrackerError::EmptyFoodName);
    }
    if !(calories.is_finite() && calories >= 0.0) {
        return Err(TrackerError::InvalidAmount(calories));
    }

    let food = FoodItem::new(
        format!("c{}", Uuid::new_v4().simple()),
        name,
        calories.round(),
        1.0,
        CUSTOM_FOOD_UNIT,
    );
    let mut next = nutrition.clone();
    next.custom_foods.push(food.clone());
    Ok((next, food))
}

/// Case-insensitive name search over the built-in catalog, then custom foods
pub fn search_foods(nutrition: &NutritionState, query: &str) -> Vec<FoodItem> {
    let needle = query.trim().to_lowercase();
    catalog::foods()
        .into_iter()
        .chain(nutrition.custom_foods.iter().cloned())
        .filter(|f| f.name.to_lowercase().contains(&needle))
        .collect()
}

/// Look a food up by id in the built-in catalog, then custom foods
pub fn find_food(nutrition: &NutritionState, id: &str) -> Option<FoodItem> {
    catalog::find_food(id).or_else(|| nutrition.custom_foods.iter().find(|f| f.id == id).cloned())
}

/// Total calories of a set of entries
pub fn calories_consumed(items: &[ConsumedItem]) -> f64 {
    items.iter().map(|c| c.food.calories).sum()
}

/// Entries of one meal slot with their calorie total
#[derive(Debug, Clone, Serialize)]
pub struct MealGroup {
    pub meal: MealType,
    pub calories: f64,
    pub items: Vec<ConsumedItem>,
}

/// Group entries by meal slot, Breakfast through Snack
pub fn group_by_meal(items: &[ConsumedItem]) -> Vec<MealGroup> {
    MealType::ALL
        .into_iter()
        .map(|meal| {
            let items: Vec<ConsumedItem> =
                items.iter().filter(|c| c.meal == meal).cloned().collect();
            MealGroup {
                meal,
                calories: calories_consumed(&items),
                items,
            }
        })
        .collect()
}

/// Meal slot suggested for a given local hour
pub fn default_meal_for_hour(hour: u32) -> MealType {
    match hour {
        0..=10 => MealType::Breakfast,
        11..=14 => MealType::Lunch,
        15..=20 => MealType::Dinner,
        _ => MealType::Snack,
    }
}

/// Consumption measured against the daily energy target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyProgress {
    pub consumed: f64,
    pub target: i64,
    pub remaining: f64,
    pub percent: f64,
    pub over: bool,
}

impl DailyProgress {
    pub fn new(consumed: f64, target: i64) -> Self {
        let target_f = target as f64;
        let percent = if target > 0 {
            (consumed / target_f * 100.0).min(100.0)
        } else {
            100.0
        };
        Self {
            consumed,
            target,
            remaining: (target_f - consumed).max(0.0),
            percent,
            over: consumed > target_f,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rice() -> FoodItem {
        FoodItem::new("f2", "White Rice (Cooked)", 205.0, 1.0, "cup")
    }

    fn nutrition() -> NutritionState {
        NutritionState::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
    }

    #[test]
    fn test_log_two_cups() {
        let item = log_consumption(&rice(), 2.0, "cup", MealType::Lunch).unwrap();
        assert_eq!(item.food.calories, 410.0);
        assert_eq!(item.food.serving_size, 2.0);
        assert_eq!(item.food.serving_unit, "cup");
        assert_eq!(item.meal, MealType::Lunch);
        assert_eq!(item.food.id, "f2");
    }

    #[test]
    fn test_log_fluid_ounces_against_cup() {
        // 8 fl oz is 236.588 ml, one cup
        let item = log_consumption(&rice(), 8.0, "fl oz", MealType::Dinner).unwrap();
        assert_eq!(item.food.calories, 205.0);
    }

    #[test]
    fn test_log_weight_units() {
        let chicken = FoodItem::new("f1", "Chicken Breast", 165.0, 4.0, "oz");
        // 226.796 g is 8 oz
        let item = log_consumption(&chicken, 226.796, "g", MealType::Dinner).unwrap();
        assert_eq!(item.food.calories, 330.0);
    }

    #[test]
    fn test_log_unconvertible_falls_back_to_serving_multiple() {
        let bread = FoodItem::new("f25", "Whole Wheat Bread", 80.0, 1.0, "slice");
        let item = log_consumption(&bread, 3.0, "g", MealType::Breakfast).unwrap();
        assert_eq!(item.food.calories, 240.0);
    }

    #[test]
    fn test_log_rejects_non_positive_amount() {
        assert_eq!(
            log_consumption(&rice(), 0.0, "cup", MealType::Lunch),
            Err(TrackerError::InvalidAmount(0.0))
        );
        assert!(log_consumption(&rice(), -1.0, "cup", MealType::Lunch).is_err());
        assert!(log_consumption(&rice(), f64::NAN, "cup", MealType::Lunch).is_err());
    }

    #[test]
    fn test_log_does_not_touch_catalog_item() {
        let food = rice();
        let before = food.clone();
        let _ = log_consumption(&food, 3.0, "cup", MealType::Lunch).unwrap();
        assert_eq!(food, before);
    }

    #[test]
    fn test_instance_ids_are_unique() {
        let a = log_consumption(&rice(), 1.0, "cup", MealType::Lunch).unwrap();
        let b = log_consumption(&rice(), 1.0, "cup", MealType::Lunch).unwrap();
        assert_ne!(a.instance_id, b.instance_id);
    }

    #[test]
    fn test_macros_scale_with_ratio() {
        let mut food = rice();
        food.protein = Some(4.0);
        let item = log_consumption(&food, 1.5, "cup", MealType::Lunch).unwrap();
        assert_eq!(item.food.protein, Some(6.0));
        assert_eq!(item.food.carbs, None);
    }

    #[test]
    fn test_preview_matches_log() {
        let food = rice();
        assert_eq!(preview_calories(&food, 0.5, "cup"), 103.0);
        assert_eq!(preview_calories(&food, 0.0, "cup"), 0.0);
    }

    #[test]
    fn test_add_and_remove_consumed() {
        let item = log_consumption(&rice(), 1.0, "cup", MealType::Lunch).unwrap();
        let id = item.instance_id.clone();
        let logged = add_consumed(&nutrition(), item);
        assert_eq!(logged.consumed.len(), 1);

        let removed = remove_consumed(&logged, &id).unwrap();
        assert!(removed.consumed.is_empty());
        assert!(matches!(
            remove_consumed(&removed, &id),
            Err(TrackerError::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_newest_entry_first() {
        let first = log_consumption(&rice(), 1.0, "cup", MealType::Lunch).unwrap();
        let second = log_consumption(&rice(), 2.0, "cup", MealType::Dinner).unwrap();
        let state = add_consumed(&add_consumed(&nutrition(), first), second.clone());
        assert_eq!(state.consumed[0], second);
    }

    #[test]
    fn test_custom_food_is_searchable() {
        let (state, food) = add_custom_food(&nutrition(), "Grandma's Lasagna", 540.0).unwrap();
        assert_eq!(food.serving_unit, CUSTOM_FOOD_UNIT);
        assert_eq!(food.serving_size, 1.0);

        let found = search_foods(&state, "lasagna");
        assert_eq!(found, vec![food.clone()]);
        assert_eq!(find_food(&state, &food.id), Some(food));

        assert_eq!(
            add_custom_food(&state, "  ", 10.0).unwrap_err(),
            TrackerError::EmptyFoodName
        );
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let found = search_foods(&nutrition(), "RICE");
        let names: Vec<_> = found.iter().map(|f| f.name.as_str()).collect();
        assert!(names.contains(&"White Rice (Cooked)"));
        assert!(names.contains(&"Brown Rice (Cooked)"));
    }

    #[test]
    fn test_group_by_meal() {
        let lunch = log_consumption(&rice(), 1.0, "cup", MealType::Lunch).unwrap();
        let snack = log_consumption(&rice(), 2.0, "cup", MealType::Snack).unwrap();
        let groups = group_by_meal(&[lunch, snack]);
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[0].meal, MealType::Breakfast);
        assert!(groups[0].items.is_empty());
        assert_eq!(groups[1].calories, 205.0);
        assert_eq!(groups[3].calories, 410.0);
    }

    #[test]
    fn test_default_meal_for_hour() {
        assert_eq!(default_meal_for_hour(7), MealType::Breakfast);
        assert_eq!(default_meal_for_hour(11), MealType::Lunch);
        assert_eq!(default_meal_for_hour(15), MealType::Dinner);
        assert_eq!(default_meal_for_hour(21), MealType::Snack);
    }

    #[test]
    fn test_daily_progress() {
        let under = DailyProgress::new(1500.0, 2000);
        assert_eq!(under.remaining, 500.0);
        assert_eq!(under.percent, 75.0);
        assert!(!under.over);

        let over = DailyProgress::new(2500.0, 2000);
        assert_eq!(over.remaining, 0.0);
        assert_eq!(over.percent, 100.0);
        assert!(over.over);
    }
}
