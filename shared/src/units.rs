//! Unit conversion and normalization module
//!
//! Height and weight may be entered in imperial units during onboarding,
//! but profiles always carry canonical metric values (cm, kg).
//!
//! Conversions round at fixed points, so converting A -> B -> A is only
//! guaranteed to come back within one unit of the original value.

use crate::rounding::{round_half_up, round_to_decimals};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

// ============================================================================
// Weight Units
// ============================================================================

/// Weight unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    #[default]
    Lbs,
}

impl WeightUnit {
    /// Convert kilograms to this unit for display
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lbs => kg_to_lbs(kg),
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lbs" | "lb" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

/// Convert pounds to kilograms, rounded to one decimal place
///
/// `kg = round(lbs × 0.453592, 1)`
pub fn lbs_to_kg(lbs: f64) -> f64 {
    round_to_decimals(lbs * KG_PER_LB, 1)
}

/// Convert kilograms to whole pounds
///
/// `lbs = round(kg / 0.453592)`
pub fn kg_to_lbs(kg: f64) -> f64 {
    round_half_up(kg / KG_PER_LB)
}

// ============================================================================
// Height Units
// ============================================================================

/// Height unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeightUnit {
    Cm,
    #[default]
    FeetInches,
}

impl HeightUnit {
    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::FeetInches => "ft/in",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for HeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(HeightUnit::Cm),
            "ft" | "feet" | "ft/in" | "feet_inches" | "imperial" => Ok(HeightUnit::FeetInches),
            _ => Err(format!("Unknown height unit: {}", s)),
        }
    }
}

/// Height split into whole feet and whole inches, for display
///
/// `inches` can come out as 12 when the remainder rounds up; that is the
/// normalizer's documented drift, not something to correct here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeetInchesHeight {
    pub feet: i32,
    pub inches: i32,
}

impl fmt::Display for FeetInchesHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'{}\"", self.feet, self.inches)
    }
}

/// Convert feet and inches to whole centimeters
///
/// `cm = round((feet × 12 + inches) × 2.54)`
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    round_half_up((feet * INCHES_PER_FOOT + inches) * CM_PER_INCH)
}

/// Convert centimeters to whole feet and rounded inches
pub fn cm_to_feet_inches(cm: f64) -> FeetInchesHeight {
    let total_inches = cm / CM_PER_INCH;
    let feet = (total_inches / INCHES_PER_FOOT).floor();
    let inches = round_half_up(total_inches % INCHES_PER_FOOT);
    FeetInchesHeight {
        feet: feet as i32,
        inches: inches as i32,
    }
}
