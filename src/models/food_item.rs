//! Food item models
//!
//! Catalog foods and the consumed entries derived from them.

use serde::{Deserialize, Serialize};

/// Meal slot an entry is logged under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    #[default]
    Snack,
}

impl MealType {
    /// All meal slots in display order
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        }
    }
}

/// A food with calories for one reference serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub calories: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    pub serving_size: f64,
    pub serving_unit: String,
}

impl FoodItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        calories: f64,
        serving_size: f64,
        serving_unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            calories,
            protein: None,
            carbs: None,
            fat: None,
            serving_size,
            serving_unit: serving_unit.into(),
        }
    }
}

/// A logged food. The embedded food describes the amount actually eaten:
/// calories and serving fields are recomputed, not copied from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumedItem {
    #[serde(flatten)]
    pub food: FoodItem,
    pub meal: MealType,
    /// Unique id of this consumption event
    pub instance_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_parsing() {
        assert_eq!(MealType::from_str("breakfast"), Some(MealType::Breakfast));
        assert_eq!(MealType::from_str("DINNER"), Some(MealType::Dinner));
        assert_eq!(MealType::from_str("brunch"), None);
    }

    #[test]
    fn test_consumed_item_layout() {
        let item = ConsumedItem {
            food: FoodItem::new("f2", "White Rice (Cooked)", 410.0, 2.0, "cup"),
            meal: MealType::Lunch,
            instance_id: "abc".into(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "f2");
        assert_eq!(json["servingSize"], 2.0);
        assert_eq!(json["servingUnit"], "cup");
        assert_eq!(json["meal"], "Lunch");
        assert_eq!(json["instanceId"], "abc");
        assert!(json.get("protein").is_none());

        let back: ConsumedItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }
}
