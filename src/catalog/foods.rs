//! Built-in food catalog
//!
//! Calories are per reference serving (serving size + unit).

use crate::models::FoodItem;

/// (id, name, calories, serving size, serving unit)
const FOODS: &[(&str, &str, f64, f64, &str)] = &[
    ("f1", "Chicken Breast", 165.0, 4.0, "oz"),
    ("f4", "Egg (Large)", 78.0, 1.0, "large"),
    ("f5", "Egg White", 17.0, 1.0, "large"),
    ("f8", "Protein Shake (Whey)", 120.0, 1.0, "scoop"),
    ("f13", "Salmon", 233.0, 4.0, "oz"),
    ("f22", "Ground Beef 80/20", 280.0, 4.0, "oz"),
    ("f23", "Ground Beef 93/7", 170.0, 4.0, "oz"),
    ("f24", "Tuna (Canned)", 120.0, 1.0, "can"),
    ("f39", "Turkey Breast", 135.0, 4.0, "oz"),
    ("f40", "Pork Chop", 220.0, 4.0, "oz"),
    ("f51", "Steak (Sirloin)", 240.0, 4.0, "oz"),
    ("f52", "Tofu", 94.0, 100.0, "g"),
    ("f53", "Shrimp", 84.0, 3.0, "oz"),
    ("f2", "White Rice (Cooked)", 205.0, 1.0, "cup"),
    ("f3", "Brown Rice (Cooked)", 216.0, 1.0, "cup"),
    ("f10", "Oatmeal (Cooked)", 158.0, 1.0, "cup"),
    ("f16", "Sweet Potato", 112.0, 5.0, "oz"),
    ("f25", "Whole Wheat Bread", 80.0, 1.0, "slice"),
    ("f26", "Pasta (Cooked)", 220.0, 1.0, "cup"),
    ("f29", "Quinoa (Cooked)", 222.0, 1.0, "cup"),
    ("f37", "Bagel", 245.0, 1.0, "piece"),
    ("f42", "Potato (Baked)", 161.0, 1.0, "medium"),
    ("f54", "Tortilla (Flour)", 140.0, 1.0, "piece"),
    ("f55", "Cereal (Generic)", 110.0, 1.0, "cup"),
    ("f6", "Apple", 95.0, 1.0, "medium"),
    ("f7", "Banana", 105.0, 1.0, "medium"),
    ("f14", "Avocado", 160.0, 0.5, "medium"),
    ("f17", "Broccoli", 55.0, 1.0, "cup"),
    ("f18", "Spinach", 7.0, 1.0, "cup"),
    ("f30", "Blueberries", 84.0, 1.0, "cup"),
    ("f31", "Strawberries", 49.0, 1.0, "cup"),
    ("f42b", "Carrot", 25.0, 1.0, "medium"),
    ("f56", "Orange", 62.0, 1.0, "medium"),
    ("f57", "Grapes", 62.0, 1.0, "cup"),
    ("f58", "Cucumber", 16.0, 1.0, "cup"),
    ("f59", "Bell Pepper", 24.0, 1.0, "medium"),
    ("f11", "Almonds", 164.0, 1.0, "oz"),
    ("f12", "Peanut Butter", 94.0, 1.0, "tbsp"),
    ("f15", "Greek Yogurt", 130.0, 1.0, "cup"),
    ("f19", "Milk (Whole)", 150.0, 1.0, "cup"),
    ("f20", "Milk (Skim)", 90.0, 1.0, "cup"),
    ("f21", "Cheddar Cheese", 115.0, 1.0, "oz"),
    ("f27", "Olive Oil", 119.0, 1.0, "tbsp"),
    ("f28", "Butter", 102.0, 1.0, "tbsp"),
    ("f38", "Cream Cheese", 50.0, 1.0, "tbsp"),
    ("f41", "Cottage Cheese", 220.0, 1.0, "cup"),
    ("f60", "Mayonnaise", 90.0, 1.0, "tbsp"),
    ("f9", "Pizza (Cheese)", 285.0, 1.0, "slice"),
    ("f32", "Potato Chips", 152.0, 1.0, "oz"),
    ("f33", "Chocolate Bar", 250.0, 1.0, "bar"),
    ("f34", "Cola", 140.0, 12.0, "fl oz"),
    ("f35", "Diet Cola", 0.0, 12.0, "fl oz"),
    ("f36", "Orange Juice", 110.0, 1.0, "cup"),
    ("f43", "Hummus", 50.0, 2.0, "tbsp"),
    ("f44", "Granola Bar", 120.0, 1.0, "bar"),
    ("f45", "Popcorn", 31.0, 1.0, "cup"),
    ("f46", "Caesar Salad", 350.0, 1.0, "bowl"),
    ("f47", "Burger", 300.0, 1.0, "sandwich"),
    ("f48", "Fries (Medium)", 360.0, 1.0, "order"),
    ("f49", "Ice Cream", 140.0, 0.5, "cup"),
    ("f50", "Beer", 180.0, 1.0, "pint"),
    ("f61", "Wine (Red)", 125.0, 5.0, "fl oz"),
    ("f62", "Cookie", 160.0, 2.0, "cookie"),
];

/// All built-in foods in catalog order
pub fn foods() -> Vec<FoodItem> {
    FOODS
        .iter()
        .map(|&(id, name, calories, serving_size, serving_unit)| {
            FoodItem::new(id, name, calories, serving_size, serving_unit)
        })
        .collect()
}

/// Look up a built-in food by id
pub fn find_food(id: &str) -> Option<FoodItem> {
    foods().into_iter().find(|f| f.id == id)
}
