//! State tree upgrades
//!
//! Brings a stored JSON tree of any older shape up to `SCHEMA_VERSION`, one
//! version step at a time. Runs on raw JSON so that trees written before a
//! field existed still deserialize.

use chrono::NaiveDate;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::db::DbResult;
use crate::models::{AppState, MealType, DEFAULT_REST_SECONDS, SCHEMA_VERSION};

const SECTIONS: [&str; 4] = ["user", "nutrition", "fasting", "workouts"];

type Step = fn(&mut Map<String, Value>, &Map<String, Value>);

/// Upgrade steps; entry `n` takes a tree from version `n` to `n + 1`
const STEPS: [Step; SCHEMA_VERSION as usize] = [fill_sections, backfill_consumed, backfill_rest];

/// Version recorded in a stored tree. Trees without one predate versioning.
pub fn stored_version(tree: &Value) -> u32 {
    tree.get("schemaVersion")
        .and_then(Value::as_u64)
        .map(|v| v as u32)
        .unwrap_or(0)
}

/// Apply every pending step and stamp the tree with the current version.
/// Returns the number of steps applied.
pub fn upgrade(tree: &mut Value, today: NaiveDate) -> DbResult<usize> {
    let defaults = match serde_json::to_value(AppState::initial(today))? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let from = stored_version(tree) as usize;
    if !tree.is_object() {
        *tree = Value::Object(Map::new());
    }
    let Some(root) = tree.as_object_mut() else {
        return Ok(0);
    };

    let mut applied = 0;
    for (version, step) in STEPS.into_iter().enumerate().skip(from) {
        step(root, &defaults);
        tracing::debug!(from = version, to = version + 1, "Upgraded stored state");
        applied += 1;
    }

    root.insert("schemaVersion".into(), json!(SCHEMA_VERSION));
    Ok(applied)
}

/// v0 -> v1: missing sections and section fields come from the defaults;
/// a missing or zero target weight becomes the current weight
fn fill_sections(root: &mut Map<String, Value>, defaults: &Map<String, Value>) {
    if let Some(user) = root.get_mut("user").and_then(Value::as_object_mut) {
        let target = user.get("targetWeight").and_then(Value::as_f64).unwrap_or(0.0);
        if target <= 0.0 {
            if let Some(weight) = user.get("weight").cloned() {
                user.insert("targetWeight".into(), weight);
            }
        }
    }

    for section in SECTIONS {
        let fallback = defaults.get(section).cloned().unwrap_or(Value::Null);
        let entry = root.entry(section).or_insert_with(|| fallback.clone());
        if !entry.is_object() {
            *entry = fallback.clone();
        }
        if let (Some(target), Some(source)) = (entry.as_object_mut(), fallback.as_object()) {
            for (key, value) in source {
                target.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
    }
}

/// v1 -> v2: consumed entries get a meal slot and an instance id
fn backfill_consumed(root: &mut Map<String, Value>, _defaults: &Map<String, Value>) {
    let Some(consumed) = root
        .get_mut("nutrition")
        .and_then(|n| n.get_mut("consumed"))
        .and_then(Value::as_array_mut)
    else {
        return;
    };

    for item in consumed.iter_mut().filter_map(Value::as_object_mut) {
        item.entry("meal")
            .or_insert_with(|| json!(MealType::Snack.as_str()));
        item.entry("instanceId")
            .or_insert_with(|| json!(Uuid::new_v4().to_string()));
    }
}

/// v2 -> v3: workout rest settings
fn backfill_rest(root: &mut Map<String, Value>, _defaults: &Map<String, Value>) {
    if let Some(workouts) = root.get_mut("workouts").and_then(Value::as_object_mut) {
        workouts
            .entry("restSeconds")
            .or_insert_with(|| json!(DEFAULT_REST_SECONDS));
        workouts.entry("rest").or_insert(Value::Null);
    }
}
