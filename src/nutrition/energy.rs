//! Daily energy estimate
//!
//! Mifflin-St Jeor basal rate scaled by activity and offset by goal.

use crate::models::{Gender, UserProfile};

/// Pounds per kilogram
pub const LB_PER_KG: f64 = 2.20462;
/// Centimeters per inch
pub const CM_PER_IN: f64 = 2.54;

/// Basal metabolic rate in kcal/day
pub fn basal_metabolic_rate(profile: &UserProfile) -> f64 {
    let weight_kg = profile.weight / LB_PER_KG;
    let height_cm = profile.height * CM_PER_IN;

    let bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * profile.age as f64;
    match profile.gender {
        Gender::Male => bmr + 5.0,
        Gender::Female => bmr - 161.0,
    }
}

/// Total daily energy expenditure adjusted for the profile's goal, in whole kcal
pub fn estimate_daily_energy(profile: &UserProfile) -> i64 {
    let total = basal_metabolic_rate(profile) * profile.activity_level + profile.goal.calorie_offset();
    total.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Goal;

    fn profile(gender: Gender, goal: Goal) -> UserProfile {
        UserProfile {
            age: 30,
            weight: 180.0,
            target_weight: 170.0,
            weight_history: Vec::new(),
            height: 70.0,
            gender,
            activity_level: 1.2,
            goal,
            tdee: 0,
        }
    }

    #[test]
    fn test_bmr_male() {
        // 10 * 81.6467 + 6.25 * 177.8 - 150 + 5
        let bmr = basal_metabolic_rate(&profile(Gender::Male, Goal::Maintain));
        assert!((bmr - 1782.7166).abs() < 0.01);
    }

    #[test]
    fn test_bmr_female_offset() {
        let male = basal_metabolic_rate(&profile(Gender::Male, Goal::Maintain));
        let female = basal_metabolic_rate(&profile(Gender::Female, Goal::Maintain));
        assert!((male - female - 166.0).abs() < 1e-9);
    }

    #[test]
    fn test_maintain_estimate() {
        assert_eq!(estimate_daily_energy(&profile(Gender::Male, Goal::Maintain)), 2139);
    }

    #[test]
    fn test_goal_offsets() {
        let maintain = estimate_daily_energy(&profile(Gender::Male, Goal::Maintain));
        assert_eq!(estimate_daily_energy(&profile(Gender::Male, Goal::Cut)), maintain - 500);
        assert_eq!(estimate_daily_energy(&profile(Gender::Male, Goal::Bulk)), maintain + 500);
    }

    #[test]
    fn test_activity_scales_bmr() {
        let mut p = profile(Gender::Female, Goal::Maintain);
        p.activity_level = 1.55;
        let expected = (basal_metabolic_rate(&p) * 1.55).round() as i64;
        assert_eq!(estimate_daily_energy(&p), expected);
    }
}
