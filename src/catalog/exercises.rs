//! Built-in exercise catalog

use crate::models::Exercise;

/// (id, name, category)
const EXERCISES: &[(&str, &str, &str)] = &[
    ("e1", "Bench Press", "Chest"),
    ("e2", "Squat", "Legs"),
    ("e3", "Deadlift", "Back"),
    ("e4", "Overhead Press", "Shoulders"),
    ("e5", "Pull Up", "Back"),
    ("e6", "Push Up", "Chest"),
    ("e7", "Dumbbell Row", "Back"),
    ("e8", "Lunge", "Legs"),
    ("e9", "Leg Press", "Legs"),
    ("e10", "Lat Pulldown", "Back"),
    ("e11", "Dumbbell Curl", "Biceps"),
    ("e12", "Tricep Extension", "Triceps"),
    ("e13", "Lateral Raise", "Shoulders"),
    ("e14", "Plank", "Core"),
    ("e15", "Crunch", "Core"),
    ("e16", "Calf Raise", "Legs"),
    ("e17", "Face Pull", "Shoulders"),
    ("e18", "Romanian Deadlift", "Legs"),
    ("e19", "Incline Bench Press", "Chest"),
    ("e20", "Leg Curl", "Legs"),
];

/// All built-in exercises in catalog order
pub fn exercises() -> Vec<Exercise> {
    EXERCISES
        .iter()
        .map(|(id, name, category)| Exercise {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
        })
        .collect()
}

/// Look up an exercise by id
pub fn find_exercise(id: &str) -> Option<Exercise> {
    exercises().into_iter().find(|e| e.id == id)
}

/// Display name for an exercise id, "Unknown" when the id is not in the catalog
pub fn exercise_name(id: &str) -> String {
    EXERCISES
        .iter()
        .find(|(eid, _, _)| *eid == id)
        .map(|(_, name, _)| name.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
