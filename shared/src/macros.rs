//! Macro allocation
//!
//! Splits a daily calorie target into protein, fat and carbohydrate grams
//! and derives per-meal and weekly views.
//!
//! # Ordering
//!
//! The sequence is load-bearing and changing it changes outputs:
//!
//! 1. `daily_calories = round(tdee × goal)`
//! 2. `protein = round(1.8 × kg)`, `protein_kcal = protein × 4`
//! 3. `fat_kcal = daily × 0.25` (unrounded), `fats = round(fat_kcal / 9)`
//! 4. `carbs = round((daily - protein_kcal - fat_kcal) / 4)`
//!
//! Because each macro is rounded on its own, `4p + 4c + 9f` can differ from
//! `daily_calories` by a few kcal. Per-meal values are rounded
//! independently too and need not sum back to the daily totals.

use crate::energy::{calculate_bmr, calculate_target_calories, calculate_tdee};
use crate::profile::{ActivityLevel, BiologicalSex, Goal, MealsPerDay};
use crate::rounding::to_whole;
use serde::{Deserialize, Serialize};

/// Grams of protein per kilogram of body weight
pub const PROTEIN_GRAMS_PER_KG: f64 = 1.8;

/// Share of daily calories allocated to fat
pub const FAT_CALORIE_SHARE: f64 = 0.25;

pub const KCAL_PER_GRAM_PROTEIN: i32 = 4;
pub const KCAL_PER_GRAM_CARBS: i32 = 4;
pub const KCAL_PER_GRAM_FAT: i32 = 9;

pub const DAYS_PER_WEEK: i32 = 7;

/// Daily macros with per-meal and weekly rollups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub daily_calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fats: i32,
    pub protein_per_meal: i32,
    pub carbs_per_meal: i32,
    pub fats_per_meal: i32,
    pub calories_per_meal: i32,
    pub weekly_calories: i32,
    pub weekly_protein: i32,
    pub weekly_carbs: i32,
    pub weekly_fats: i32,
}

/// Complete computed plan for a profile
///
/// Pure value object: reproducible from the profile alone, recomputed
/// wholesale on every profile change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroCalculation {
    pub bmr: i32,
    pub tdee: i32,
    pub daily_calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fats: i32,
    pub protein_per_meal: i32,
    pub carbs_per_meal: i32,
    pub fats_per_meal: i32,
    pub calories_per_meal: i32,
    pub weekly_calories: i32,
    pub weekly_protein: i32,
    pub weekly_carbs: i32,
    pub weekly_fats: i32,
}

impl MacroCalculation {
    fn from_parts(bmr: i32, tdee: i32, split: MacroSplit) -> Self {
        Self {
            bmr,
            tdee,
            daily_calories: split.daily_calories,
            protein: split.protein,
            carbs: split.carbs,
            fats: split.fats,
            protein_per_meal: split.protein_per_meal,
            carbs_per_meal: split.carbs_per_meal,
            fats_per_meal: split.fats_per_meal,
            calories_per_meal: split.calories_per_meal,
            weekly_calories: split.weekly_calories,
            weekly_protein: split.weekly_protein,
            weekly_carbs: split.weekly_carbs,
            weekly_fats: split.weekly_fats,
        }
    }

    /// Calories implied by the rounded gram amounts
    pub fn macro_calories(&self) -> i32 {
        self.protein
            .saturating_mul(KCAL_PER_GRAM_PROTEIN)
            .saturating_add(self.carbs.saturating_mul(KCAL_PER_GRAM_CARBS))
            .saturating_add(self.fats.saturating_mul(KCAL_PER_GRAM_FAT))
    }

    /// Difference between gram-implied calories and the daily target
    pub fn calorie_residue(&self) -> i32 {
        self.macro_calories().saturating_sub(self.daily_calories)
    }
}

/// Split a daily calorie target into macros for a given body weight
pub fn calculate_macros(daily_calories: i32, weight_kg: f64, meals_per_day: MealsPerDay) -> MacroSplit {
    let daily = daily_calories as f64;

    let protein = to_whole(PROTEIN_GRAMS_PER_KG * weight_kg);
    let protein_calories = protein as f64 * KCAL_PER_GRAM_PROTEIN as f64;

    // Fat grams round, fat_calories stays exact for the carb remainder
    let fat_calories = daily * FAT_CALORIE_SHARE;
    let fats = to_whole(fat_calories / KCAL_PER_GRAM_FAT as f64);

    let remaining_calories = daily - protein_calories - fat_calories;
    let carbs = to_whole(remaining_calories / KCAL_PER_GRAM_CARBS as f64);

    let meals = meals_per_day.get() as f64;
    let per_meal = |grams: i32| to_whole(grams as f64 / meals);
    // Saturates like the gram values themselves for out-of-range bodies
    let weekly = |amount: i32| amount.saturating_mul(DAYS_PER_WEEK);

    MacroSplit {
        daily_calories,
        protein,
        carbs,
        fats,
        protein_per_meal: per_meal(protein),
        carbs_per_meal: per_meal(carbs),
        fats_per_meal: per_meal(fats),
        calories_per_meal: per_meal(daily_calories),
        weekly_calories: weekly(daily_calories),
        weekly_protein: weekly(protein),
        weekly_carbs: weekly(carbs),
        weekly_fats: weekly(fats),
    }
}

/// Run the whole pipeline: BMR -> TDEE -> target -> macro split
///
/// Inputs must already be normalized to metric.
pub fn calculate_full_macros(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    sex: BiologicalSex,
    activity_level: ActivityLevel,
    goal: Goal,
    meals_per_day: MealsPerDay,
) -> MacroCalculation {
    let bmr = calculate_bmr(weight_kg, height_cm, age, sex);
    let tdee = calculate_tdee(bmr, activity_level);
    let daily_calories = calculate_target_calories(tdee, goal);
    let split = calculate_macros(daily_calories, weight_kg, meals_per_day);

    MacroCalculation::from_parts(to_whole(bmr), to_whole(tdee), split)
}
