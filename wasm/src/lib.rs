//! MacroMasters WASM Module
//!
//! Browser bindings for the calculator, so the client can preview a plan
//! while the questionnaire is still being filled in. Enum inputs use the
//! same wire names as the API (`"very-active"`, `"fat-loss"`, ...).

use macromasters_shared::{
    gamification, units, ActivityLevel, BiologicalSex, Goal, MacroCalculation, MealsPerDay,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

/// Convert feet and inches to whole centimeters
#[wasm_bindgen]
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    units::feet_inches_to_cm(feet, inches)
}

/// Convert pounds to kilograms (1 decimal)
#[wasm_bindgen]
pub fn lbs_to_kg(lbs: f64) -> f64 {
    units::lbs_to_kg(lbs)
}

#[wasm_bindgen]
pub fn kg_to_lbs(kg: f64) -> f64 {
    units::kg_to_lbs(kg)
}

/// Basal Metabolic Rate (Mifflin-St Jeor)
#[wasm_bindgen]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: u32, sex: &str) -> Result<f64, JsError> {
    let sex: BiologicalSex = parse_choice("sex", sex).map_err(|e| JsError::new(&e))?;
    Ok(macromasters_shared::calculate_bmr(weight_kg, height_cm, age, sex))
}

/// Total Daily Energy Expenditure from a BMR
#[wasm_bindgen]
pub fn calculate_tdee(bmr: f64, activity_level: &str) -> Result<f64, JsError> {
    let level: ActivityLevel =
        parse_choice("activity_level", activity_level).map_err(|e| JsError::new(&e))?;
    Ok(macromasters_shared::calculate_tdee(bmr, level))
}

/// Full plan as a JSON string
#[wasm_bindgen]
pub fn calculate_macros_json(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    sex: &str,
    activity_level: &str,
    goal: &str,
    meals_per_day: u8,
) -> Result<String, JsError> {
    full_macros(weight_kg, height_cm, age, sex, activity_level, goal, meals_per_day)
        .and_then(|macros| serde_json::to_string(&macros).map_err(|e| e.to_string()))
        .map_err(|e| JsError::new(&e))
}

/// Level for an XP total
#[wasm_bindgen]
pub fn level_from_xp(xp: u32) -> u32 {
    gamification::level_from_xp(xp)
}

/// Percentage progress through the current level
#[wasm_bindgen]
pub fn level_progress_percent(xp: u32) -> f64 {
    gamification::level_progress(xp).percentage
}

fn full_macros(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    sex: &str,
    activity_level: &str,
    goal: &str,
    meals_per_day: u8,
) -> Result<MacroCalculation, String> {
    let sex: BiologicalSex = parse_choice("sex", sex)?;
    let level: ActivityLevel = parse_choice("activity_level", activity_level)?;
    let goal: Goal = parse_choice("goal", goal)?;
    let meals = MealsPerDay::new(meals_per_day).map_err(|e| e.to_string())?;

    Ok(macromasters_shared::calculate_full_macros(
        weight_kg, height_cm, age, sex, level, goal, meals,
    ))
}

fn parse_choice<T: DeserializeOwned>(field: &str, value: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("Unknown {}: {}", field, value))
}
