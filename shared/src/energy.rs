//! Energy expenditure calculations
//!
//! BMR (Mifflin-St Jeor), TDEE and the goal-adjusted daily calorie target.
//!
//! # Precision
//!
//! BMR and TDEE stay real-valued. The first rounding point in the pipeline
//! is [`calculate_target_calories`]; everything downstream works from that
//! whole number.

use crate::profile::{ActivityLevel, BiologicalSex, Goal};
use crate::rounding::to_whole;

impl ActivityLevel {
    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

impl Goal {
    /// Get the calorie multiplier applied to TDEE
    pub fn multiplier(&self) -> f64 {
        match self {
            Goal::FatLoss => 0.80,
            Goal::Recomp => 1.00,
            Goal::LeanBulk => 1.10,
        }
    }
}

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: u32, sex: BiologicalSex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64;
    match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female => base - 161.0,
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

/// Calculate the whole-kcal daily target for a goal
///
/// `round(tdee × goal multiplier)`
pub fn calculate_target_calories(tdee: f64, goal: Goal) -> i32 {
    to_whole(tdee * goal.multiplier())
}
