//! Unit types and conversion constants
//!
//! Provides the weight and volume units food can be logged in, along with
//! their fixed conversion factors.

use serde::{Deserialize, Serialize};

/// Family a measurement unit belongs to. Conversion only happens within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    /// Mass units, converted through grams
    Weight,
    /// Volume units, converted through milliliters
    Volume,
}

impl UnitFamily {
    /// Units of this family in display order
    pub fn units(&self) -> &'static [Unit] {
        match self {
            UnitFamily::Weight => WEIGHT_UNITS,
            UnitFamily::Volume => VOLUME_UNITS,
        }
    }
}

/// A recognized measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Gram,
    Ounce,
    Pound,
    Kilogram,
    Milliliter,
    FluidOunce,
    Cup,
    Tablespoon,
    Teaspoon,
    Liter,
}

/// Weight units in the order they are offered for logging
pub const WEIGHT_UNITS: &[Unit] = &[Unit::Ounce, Unit::Gram, Unit::Pound, Unit::Kilogram];

/// Volume units in the order they are offered for logging
pub const VOLUME_UNITS: &[Unit] = &[
    Unit::Milliliter,
    Unit::FluidOunce,
    Unit::Cup,
    Unit::Tablespoon,
    Unit::Teaspoon,
    Unit::Liter,
];

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// Milliliters per cup (US)
pub const ML_PER_CUP: f64 = 236.588;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 14.7868;
/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 4.92892;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;

impl Unit {
    /// Recognize a unit string. Matching ignores case and surrounding whitespace.
    pub fn parse(unit: &str) -> Option<Self> {
        let lower = unit.to_lowercase();
        let trimmed = lower.trim();

        match trimmed {
            "g" | "gram" | "grams" => Some(Unit::Gram),
            "oz" | "ounce" | "ounces" => Some(Unit::Ounce),
            "lb" | "lbs" | "pound" | "pounds" => Some(Unit::Pound),
            "kg" | "kilogram" | "kilograms" => Some(Unit::Kilogram),
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Some(Unit::Milliliter)
            }
            "fl oz" | "floz" | "fluid ounce" | "fluid ounces" => Some(Unit::FluidOunce),
            "cup" | "cups" => Some(Unit::Cup),
            "tbsp" | "tablespoon" | "tablespoons" => Some(Unit::Tablespoon),
            "tsp" | "teaspoon" | "teaspoons" => Some(Unit::Teaspoon),
            "l" | "liter" | "liters" | "litre" | "litres" => Some(Unit::Liter),
            _ => None,
        }
    }

    /// Canonical short code, as stored on food entries
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Kilogram => "kg",
            Unit::Milliliter => "ml",
            Unit::FluidOunce => "fl oz",
            Unit::Cup => "cup",
            Unit::Tablespoon => "tbsp",
            Unit::Teaspoon => "tsp",
            Unit::Liter => "l",
        }
    }

    pub fn family(&self) -> UnitFamily {
        match self {
            Unit::Gram | Unit::Ounce | Unit::Pound | Unit::Kilogram => UnitFamily::Weight,
            _ => UnitFamily::Volume,
        }
    }

    /// Size of one of this unit in the family's base unit (grams or milliliters)
    pub fn base_factor(&self) -> f64 {
        match self {
            Unit::Gram => 1.0,
            Unit::Ounce => G_PER_OZ,
            Unit::Pound => G_PER_LB,
            Unit::Kilogram => G_PER_KG,
            Unit::Milliliter => 1.0,
            Unit::FluidOunce => ML_PER_FL_OZ,
            Unit::Cup => ML_PER_CUP,
            Unit::Tablespoon => ML_PER_TBSP,
            Unit::Teaspoon => ML_PER_TSP,
            Unit::Liter => ML_PER_LITER,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Get the conversion factor to grams for a weight unit
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    Unit::parse(unit)
        .filter(|u| u.family() == UnitFamily::Weight)
        .map(|u| u.base_factor())
}

/// Get the conversion factor to milliliters for a volume unit
pub fn ml_per_unit(unit: &str) -> Option<f64> {
    Unit::parse(unit)
        .filter(|u| u.family() == UnitFamily::Volume)
        .map(|u| u.base_factor())
}

/// Determine the family of a unit string, if it is recognized at all
pub fn categorize_unit(unit: &str) -> Option<UnitFamily> {
    Unit::parse(unit).map(|u| u.family())
}
