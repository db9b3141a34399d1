//! User profile value types
//!
//! The profile is the sole source of truth for every derived number. It is
//! an immutable value: edits produce a new profile and a freshly computed
//! [`MacroCalculation`], never a patched one.

use crate::errors::ProfileError;
use crate::macros::{calculate_full_macros, MacroCalculation};
use crate::units::{cm_to_feet_inches, FeetInchesHeight, HeightUnit, WeightUnit};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Closed Choice Types
// ============================================================================

/// Biological sex for physiological calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
}

/// Activity level used to scale BMR into TDEE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Desk job, little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or a physical job
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

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Desk job, little movement",
            ActivityLevel::Light => "Light exercise 1-3 days/week",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days/week",
            ActivityLevel::Active => "Hard exercise 6-7 days/week",
            ActivityLevel::VeryActive => "Athlete or physical job",
        }
    }
}

/// Body composition goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    FatLoss,
    Recomp,
    LeanBulk,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::FatLoss, Goal::Recomp, Goal::LeanBulk];

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Goal::FatLoss => "Lose fat (20% deficit)",
            Goal::Recomp => "Recomposition (maintenance)",
            Goal::LeanBulk => "Lean bulk (10% surplus)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DietaryPreference {
    #[default]
    Standard,
    Vegetarian,
    Vegan,
    Keto,
    Paleo,
    Halal,
    Kosher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CookingSkill {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

/// Weekly food budget bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    #[default]
    Medium,
    High,
}

// ============================================================================
// Meals Per Day
// ============================================================================

/// Number of meals per day, always within 2..=6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MealsPerDay(u8);

impl MealsPerDay {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 6;

    pub fn new(meals: u8) -> Result<Self, ProfileError> {
        if (Self::MIN..=Self::MAX).contains(&meals) {
            Ok(Self(meals))
        } else {
            Err(ProfileError::InvalidMealsPerDay(meals))
        }
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for MealsPerDay {
    fn default() -> Self {
        Self(4)
    }
}

impl TryFrom<u8> for MealsPerDay {
    type Error = ProfileError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MealsPerDay> for u8 {
    fn from(value: MealsPerDay) -> Self {
        value.0
    }
}

impl fmt::Display for MealsPerDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// User Profile
// ============================================================================

/// Completed user profile
///
/// Height and weight are always canonical metric values. The imperial
/// components are kept only so the client can echo what the user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub sex: BiologicalSex,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_percentage: Option<f64>,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub training_days_per_week: u8,
    pub dietary_preference: DietaryPreference,
    pub allergies: Vec<String>,
    pub budget: Budget,
    pub cooking_skill: CookingSkill,
    pub meals_per_day: MealsPerDay,
    pub wake_up_time: String,
    pub bed_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_imperial: Option<FeetInchesHeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_lbs: Option<f64>,
    /// Units the user last entered height and weight in
    #[serde(default)]
    pub height_unit: HeightUnit,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Compute the full macro plan for this profile
    pub fn macros(&self) -> MacroCalculation {
        calculate_full_macros(
            self.weight_kg,
            self.height_cm,
            self.age,
            self.sex,
            self.activity_level,
            self.goal,
            self.meals_per_day,
        )
    }

    /// Height in the user's preferred unit, e.g. `5'11"` or `180 cm`
    pub fn height_display(&self) -> String {
        match self.height_unit {
            HeightUnit::Cm => format!("{} cm", self.height_cm),
            HeightUnit::FeetInches => self
                .height_imperial
                .unwrap_or_else(|| cm_to_feet_inches(self.height_cm))
                .to_string(),
        }
    }

    /// Weight in the user's preferred unit, e.g. `176 lbs`
    pub fn weight_display(&self) -> String {
        let value = match (self.weight_unit, self.weight_lbs) {
            (WeightUnit::Lbs, Some(lbs)) => lbs,
            (unit, _) => unit.from_kg(self.weight_kg),
        };
        format!("{} {}", value, self.weight_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meals_per_day_bounds() {
        assert!(MealsPerDay::new(1).is_err());
        assert!(MealsPerDay::new(7).is_err());
        for meals in 2..=6 {
            assert_eq!(MealsPerDay::new(meals).unwrap().get(), meals);
        }
        assert_eq!(MealsPerDay::default().get(), 4);
    }

    #[test]
    fn test_meals_per_day_serde_rejects_out_of_range() {
        let meals: MealsPerDay = serde_json::from_str("3").unwrap();
        assert_eq!(meals.get(), 3);
        assert_eq!(serde_json::to_string(&meals).unwrap(), "3");
        assert!(serde_json::from_str::<MealsPerDay>("8").is_err());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&ActivityLevel::VeryActive).unwrap(),
            "\"very-active\""
        );
        assert_eq!(serde_json::to_string(&Goal::FatLoss).unwrap(), "\"fat-loss\"");
        assert_eq!(serde_json::to_string(&Goal::LeanBulk).unwrap(), "\"lean-bulk\"");
        assert_eq!(serde_json::to_string(&BiologicalSex::Female).unwrap(), "\"female\"");
        let level: ActivityLevel = serde_json::from_str("\"moderate\"").unwrap();
        assert_eq!(level, ActivityLevel::Moderate);
        assert!(serde_json::from_str::<Goal>("\"bulk\"").is_err());
    }

    fn sample_profile(height_unit: HeightUnit, weight_unit: WeightUnit) -> UserProfile {
        let now = Utc::now();
        UserProfile {
            id: Uuid::new_v4(),
            sex: BiologicalSex::Male,
            age: 30,
            height_cm: 180.0,
            weight_kg: 80.0,
            body_fat_percentage: None,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Recomp,
            training_days_per_week: 3,
            dietary_preference: DietaryPreference::default(),
            allergies: Vec::new(),
            budget: Budget::default(),
            cooking_skill: CookingSkill::default(),
            meals_per_day: MealsPerDay::default(),
            wake_up_time: "07:00".to_string(),
            bed_time: "23:00".to_string(),
            height_imperial: None,
            weight_lbs: None,
            height_unit,
            weight_unit,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_display_follows_entered_units() {
        let profile = sample_profile(HeightUnit::Cm, WeightUnit::Kg);
        assert_eq!(profile.height_display(), "180 cm");
        assert_eq!(profile.weight_display(), "80 kg");

        let profile = sample_profile(HeightUnit::FeetInches, WeightUnit::Lbs);
        assert_eq!(profile.height_display(), "5'11\"");
        assert_eq!(profile.weight_display(), "176 lbs");
        assert_eq!(profile.macros().daily_calories, 2759);
    }

    #[test]
    fn test_display_prefers_entered_imperial_values() {
        // 72.9 kg would convert back to 161 lbs
        let mut profile = sample_profile(HeightUnit::FeetInches, WeightUnit::Lbs);
        profile.weight_kg = 72.9;
        profile.weight_lbs = Some(160.0);
        profile.height_imperial = Some(FeetInchesHeight { feet: 5, inches: 12 });
        assert_eq!(profile.weight_display(), "160 lbs");
        assert_eq!(profile.height_display(), "5'12\"");

        profile.weight_unit = WeightUnit::Kg;
        assert_eq!(profile.weight_display(), "72.9 kg");
    }
}
