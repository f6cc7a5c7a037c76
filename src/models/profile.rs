//! User profile model
//!
//! Body metrics, activity level and goal, plus the derived daily energy target.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::nutrition::estimate_daily_energy;

/// Biological sex used by the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Body-weight goal, which offsets the daily energy target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Cut,
    #[default]
    Maintain,
    Bulk,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Cut => "cut",
            Goal::Maintain => "maintain",
            Goal::Bulk => "bulk",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cut" => Some(Goal::Cut),
            "maintain" => Some(Goal::Maintain),
            "bulk" => Some(Goal::Bulk),
            _ => None,
        }
    }

    /// Daily kcal offset applied on top of maintenance
    pub fn calorie_offset(&self) -> f64 {
        match self {
            Goal::Cut => -500.0,
            Goal::Maintain => 0.0,
            Goal::Bulk => 500.0,
        }
    }
}

/// Enumerated activity levels. The profile stores the multiplier itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "light" => Some(ActivityLevel::Light),
            "moderate" => Some(ActivityLevel::Moderate),
            "active" => Some(ActivityLevel::Active),
            "very_active" => Some(ActivityLevel::VeryActive),
            _ => None,
        }
    }

    /// Find the level whose multiplier matches a stored value
    pub fn from_multiplier(multiplier: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| (level.multiplier() - multiplier).abs() < 1e-6)
    }
}

/// A dated body-weight sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub date: DateTime<Utc>,
    pub weight: f64,
}

/// The user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age: u32,
    /// Pounds
    pub weight: f64,
    /// Pounds
    pub target_weight: f64,
    #[serde(default)]
    pub weight_history: Vec<WeightEntry>,
    /// Inches
    pub height: f64,
    pub gender: Gender,
    /// Activity multiplier, 1.2 to 1.9
    pub activity_level: f64,
    pub goal: Goal,
    pub tdee: i64,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: 30,
            weight: 180.0,
            target_weight: 170.0,
            weight_history: Vec::new(),
            height: 70.0,
            gender: Gender::Male,
            activity_level: ActivityLevel::Sedentary.multiplier(),
            goal: Goal::Maintain,
            tdee: 0,
        }
        .with_recomputed_tdee()
    }
}

/// Changes to apply to a profile. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub height: Option<f64>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
}

/// Distance between current and target weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightToGo {
    pub pounds: f64,
    pub gaining: bool,
}

impl UserProfile {
    /// Apply settings changes and recompute the energy target
    pub fn update(&self, changes: &ProfileUpdate) -> Result<Self, TrackerError> {
        let mut next = self.clone();
        if let Some(age) = changes.age {
            if age == 0 {
                return Err(TrackerError::InvalidProfile("age must be positive".into()));
            }
            next.age = age;
        }
        if let Some(weight) = changes.weight {
            require_positive("weight", weight)?;
            next.weight = weight;
        }
        if let Some(target) = changes.target_weight {
            require_positive("target weight", target)?;
            next.target_weight = target;
        }
        if let Some(height) = changes.height {
            require_positive("height", height)?;
            next.height = height;
        }
        if let Some(gender) = changes.gender {
            next.gender = gender;
        }
        if let Some(level) = changes.activity_level {
            next.activity_level = level.multiplier();
        }
        if let Some(goal) = changes.goal {
            next.goal = goal;
        }
        Ok(next.with_recomputed_tdee())
    }

    /// Record a weigh-in: updates the current weight, appends a history sample
    /// and recomputes the energy target.
    pub fn record_weight(&self, weight: f64, now: DateTime<Utc>) -> Result<Self, TrackerError> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(TrackerError::InvalidAmount(weight));
        }
        let mut next = self.clone();
        next.weight = weight;
        next.weight_history.push(WeightEntry { date: now, weight });
        Ok(next.with_recomputed_tdee())
    }

    pub fn with_recomputed_tdee(mut self) -> Self {
        self.tdee = estimate_daily_energy(&self);
        self
    }

    pub fn weight_to_go(&self) -> WeightToGo {
        WeightToGo {
            pounds: ((self.weight - self.target_weight).abs() * 10.0).round() / 10.0,
            gaining: self.target_weight > self.weight,
        }
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), TrackerError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TrackerError::InvalidProfile(format!("{} must be positive", field)))
    }
}
