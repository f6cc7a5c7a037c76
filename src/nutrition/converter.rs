//! Unit conversion functions
//!
//! Converts amounts between units of the same family and derives the serving
//! ratio used to scale a food's reference calories.

use serde::Serialize;

use super::units::{categorize_unit, Unit};

/// Convert `value` from one unit to another.
///
/// Identical unit strings always convert to themselves, even when the unit is
/// not recognized. Otherwise both units must belong to the same family;
/// `None` means the pair is not convertible. No rounding is applied.
pub fn convert(value: f64, from: &str, to: &str) -> Option<f64> {
    if from == to {
        return Some(value);
    }

    let from_unit = Unit::parse(from)?;
    let to_unit = Unit::parse(to)?;

    if from_unit.family() != to_unit.family() {
        return None;
    }

    Some(value * from_unit.base_factor() / to_unit.base_factor())
}

/// How a logged amount was related to a food's reference serving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioMethod {
    /// The logged amount was converted into the serving unit
    Converted,
    /// The units were not convertible; the amount was taken as a multiple of
    /// the serving magnitude
    ServingMultiple,
}

/// Ratio of a logged amount to a food's reference serving
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServingRatio {
    pub ratio: f64,
    pub method: RatioMethod,
}

/// Calculate how many reference servings `amount` of `unit` represents.
///
/// # Arguments
/// * `amount` - The logged amount (e.g., 8.0)
/// * `unit` - The unit the amount was logged in (e.g., "fl oz")
/// * `serving_size` - The food's reference serving magnitude (e.g., 1.0)
/// * `serving_unit` - The food's reference serving unit (e.g., "cup")
pub fn serving_ratio(amount: f64, unit: &str, serving_size: f64, serving_unit: &str) -> ServingRatio {
    if let Some(converted) = convert(amount, unit, serving_unit) {
        return ServingRatio {
            ratio: converted / serving_size,
            method: RatioMethod::Converted,
        };
    }

    // Both units are known but belong to different families. The amount is
    // still taken as a serving multiple, which is almost certainly not what
    // the caller meant.
    if let (Some(logged), Some(reference)) = (categorize_unit(unit), categorize_unit(serving_unit)) {
        if logged != reference {
            tracing::warn!(
                "Unit family mismatch: '{}' vs '{}'. Treating {} as a serving multiple.",
                unit,
                serving_unit,
                amount
            );
        }
    }

    ServingRatio {
        ratio: amount / serving_size,
        method: RatioMethod::ServingMultiple,
    }
}

/// Units a food can be logged in: the whole family of its serving unit, or
/// only the serving unit itself when it is not a recognized unit.
pub fn available_units(serving_unit: &str) -> Vec<String> {
    match Unit::parse(serving_unit) {
        Some(unit) => unit
            .family()
            .units()
            .iter()
            .map(|u| u.as_str().to_string())
            .collect(),
        None => vec![serving_unit.to_string()],
    }
}

/// Re-express an amount when the logging unit is switched.
///
/// Convertible amounts are rounded to one decimal place for entry; anything
/// else (non-positive amounts, unconvertible pairs) keeps its value.
pub fn rescale_amount(amount: f64, from: &str, to: &str) -> f64 {
    if amount <= 0.0 || from == to {
        return amount;
    }
    match convert(amount, from, to) {
        Some(converted) => (converted * 10.0).round() / 10.0,
        None => amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::units::{VOLUME_UNITS, WEIGHT_UNITS};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9 * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_identity_for_same_unit() {
        assert_eq!(convert(3.5, "g", "g"), Some(3.5));
        assert_eq!(convert(2.0, "slice", "slice"), Some(2.0));
    }

    #[test]
    fn test_weight_conversion() {
        assert_close(convert(1.0, "lb", "g").unwrap(), 453.592);
        assert_close(convert(16.0, "oz", "lb").unwrap(), 16.0 * 28.3495 / 453.592);
        assert_close(convert(2.5, "kg", "g").unwrap(), 2500.0);
    }

    #[test]
    fn test_volume_conversion() {
        assert_close(convert(1.0, "cup", "ml").unwrap(), 236.588);
        assert_close(convert(3.0, "tsp", "tbsp").unwrap(), 3.0 * 4.92892 / 14.7868);
        assert_close(convert(1.0, "l", "ml").unwrap(), 1000.0);
    }

    #[test]
    fn test_weight_round_trips() {
        for a in WEIGHT_UNITS {
            for b in WEIGHT_UNITS {
                let there = convert(123.4, a.as_str(), b.as_str()).unwrap();
                let back = convert(there, b.as_str(), a.as_str()).unwrap();
                assert_close(back, 123.4);
            }
        }
    }

    #[test]
    fn test_volume_round_trips() {
        for a in VOLUME_UNITS {
            for b in VOLUME_UNITS {
                let there = convert(7.25, a.as_str(), b.as_str()).unwrap();
                let back = convert(there, b.as_str(), a.as_str()).unwrap();
                assert_close(back, 7.25);
            }
        }
    }

    #[test]
    fn test_cross_family_is_unsupported() {
        assert_eq!(convert(5.0, "cup", "lb"), None);
        assert_eq!(convert(5.0, "g", "ml"), None);
        assert_eq!(convert(1.0, "slice", "g"), None);
        assert_eq!(convert(1.0, "oz", "fl oz"), None);
    }

    #[test]
    fn test_serving_ratio_converted() {
        let r = serving_ratio(8.0, "fl oz", 1.0, "cup");
        assert_eq!(r.method, RatioMethod::Converted);
        assert!((r.ratio - 8.0 * 29.5735 / 236.588).abs() < 1e-9);
    }

    #[test]
    fn test_serving_ratio_fallback() {
        // 2 oz against a cup serving is taken as two servings
        let r = serving_ratio(2.0, "oz", 1.0, "cup");
        assert_eq!(r.method, RatioMethod::ServingMultiple);
        assert!((r.ratio - 2.0).abs() < 1e-9);

        let r = serving_ratio(3.0, "cookie", 2.0, "cookie");
        assert_eq!(r.method, RatioMethod::Converted);
        assert!((r.ratio - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_available_units() {
        assert_eq!(available_units("oz"), vec!["oz", "g", "lb", "kg"]);
        assert_eq!(available_units("cup").len(), 6);
        assert_eq!(available_units("slice"), vec!["slice"]);
    }

    #[test]
    fn test_rescale_amount() {
        // 4 oz is 113.398 g, shown as 113.4
        assert_eq!(rescale_amount(4.0, "oz", "g"), 113.4);
        assert_eq!(rescale_amount(4.0, "oz", "cup"), 4.0);
        assert_eq!(rescale_amount(0.0, "oz", "g"), 0.0);
    }
}
