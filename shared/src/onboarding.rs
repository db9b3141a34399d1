//! Onboarding questionnaire
//!
//! Collects a partial record step by step and turns it into a
//! [`UserProfile`] once every calculator-relevant field is present. This
//! is the gate that keeps partially filled profiles away from the
//! calculator.

use crate::errors::ProfileError;
use crate::profile::{
    ActivityLevel, BiologicalSex, Budget, CookingSkill, DietaryPreference, Goal, MealsPerDay,
    UserProfile,
};
use crate::units::{
    cm_to_feet_inches, feet_inches_to_cm, kg_to_lbs, lbs_to_kg, HeightUnit, WeightUnit,
};
use crate::validation::validate_clock_time;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_TRAINING_DAYS: u8 = 4;
pub const DEFAULT_WAKE_UP_TIME: &str = "07:00";
pub const DEFAULT_BED_TIME: &str = "23:00";

// ============================================================================
// Steps
// ============================================================================

/// Questionnaire steps, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Sex,
    Age,
    Height,
    Weight,
    BodyFat,
    Activity,
    Goal,
    Training,
    Diet,
    Allergies,
    Budget,
    Cooking,
    Meals,
    Schedule,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 14] = [
        OnboardingStep::Sex,
        OnboardingStep::Age,
        OnboardingStep::Height,
        OnboardingStep::Weight,
        OnboardingStep::BodyFat,
        OnboardingStep::Activity,
        OnboardingStep::Goal,
        OnboardingStep::Training,
        OnboardingStep::Diet,
        OnboardingStep::Allergies,
        OnboardingStep::Budget,
        OnboardingStep::Cooking,
        OnboardingStep::Meals,
        OnboardingStep::Schedule,
    ];

    pub const TOTAL: usize = Self::ALL.len();

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_last(self) -> bool {
        self.index() == Self::TOTAL - 1
    }

    /// Fields this step is responsible for collecting
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            OnboardingStep::Sex => &["sex"],
            OnboardingStep::Age => &["age"],
            OnboardingStep::Height => &["height"],
            OnboardingStep::Weight => &["weight"],
            OnboardingStep::BodyFat => &["body_fat_percentage"],
            OnboardingStep::Activity => &["activity_level"],
            OnboardingStep::Goal => &["goal"],
            OnboardingStep::Training => &["training_days_per_week"],
            OnboardingStep::Diet => &["dietary_preference"],
            OnboardingStep::Allergies => &["allergies"],
            OnboardingStep::Budget => &["budget"],
            OnboardingStep::Cooking => &["cooking_skill"],
            OnboardingStep::Meals => &["meals_per_day"],
            OnboardingStep::Schedule => &["wake_up_time", "bed_time"],
        }
    }

    /// Whether the collected data lets the user move past this step
    ///
    /// Body fat and allergies are optional.
    pub fn can_proceed(self, data: &OnboardingData) -> bool {
        match self {
            OnboardingStep::Sex => data.sex.is_some(),
            OnboardingStep::Age => data.age.is_some_and(|age| age > 0),
            OnboardingStep::Height => data.resolved_height_cm().is_some(),
            OnboardingStep::Weight => data.resolved_weight_kg().is_some(),
            OnboardingStep::BodyFat => true,
            OnboardingStep::Activity => data.activity_level.is_some(),
            OnboardingStep::Goal => data.goal.is_some(),
            OnboardingStep::Training => data.training_days_per_week.is_some_and(|d| d > 0),
            OnboardingStep::Diet => data.dietary_preference.is_some(),
            OnboardingStep::Allergies => true,
            OnboardingStep::Budget => data.budget.is_some(),
            OnboardingStep::Cooking => data.cooking_skill.is_some(),
            OnboardingStep::Meals => data.meals_per_day.is_some(),
            OnboardingStep::Schedule => {
                data.wake_up_time.as_deref().is_some_and(|t| !t.is_empty())
                    && data.bed_time.as_deref().is_some_and(|t| !t.is_empty())
            }
        }
    }
}

// ============================================================================
// Collected Data
// ============================================================================

/// Partially collected questionnaire answers
///
/// Also used as a patch: [`OnboardingData::apply`] merges only the fields
/// that are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OnboardingData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<BiologicalSex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 9.0, message = "Feet must be between 0 and 9"))]
    pub height_feet: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 12.0, message = "Inches must be between 0 and 12"))]
    pub height_inches: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 44.0, max = 1100.0, message = "Weight must be between 44 and 1100 lbs"))]
    pub weight_lbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be between 20 and 500 kg"))]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 2.0, max = 70.0, message = "Body fat must be between 2% and 70%"))]
    pub body_fat_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 7, message = "Training days must be between 1 and 7"))]
    pub training_days_per_week: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_preference: Option<DietaryPreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_skill: Option<CookingSkill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meals_per_day: Option<MealsPerDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wake_up_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_time: Option<String>,
    /// Unit system the height was last entered in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_unit: Option<HeightUnit>,
    /// Unit the weight was last entered in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<WeightUnit>,
}

impl OnboardingData {
    /// Merge a partial update into this record
    ///
    /// Height and weight keep both unit systems in sync with whichever one
    /// the patch edited. A patch carrying both takes the metric value.
    pub fn apply(&mut self, patch: OnboardingData) {
        let metric_height = patch.height_cm.is_some();
        let imperial_height = patch.height_feet.is_some() || patch.height_inches.is_some();
        let metric_weight = patch.weight_kg.is_some();
        let imperial_weight = patch.weight_lbs.is_some();

        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if patch.$field.is_some() { self.$field = patch.$field; })*
            };
        }
        merge!(
            sex,
            age,
            height_feet,
            height_inches,
            height_cm,
            weight_lbs,
            weight_kg,
            body_fat_percentage,
            activity_level,
            goal,
            training_days_per_week,
            dietary_preference,
            allergies,
            budget,
            cooking_skill,
            meals_per_day,
            wake_up_time,
            bed_time,
            height_unit,
            weight_unit,
        );

        if metric_height {
            if let Some(cm) = self.height_cm {
                let split = cm_to_feet_inches(cm);
                self.height_feet = Some(split.feet as f64);
                self.height_inches = Some(split.inches as f64);
            }
            self.height_unit = Some(HeightUnit::Cm);
        } else if imperial_height {
            let feet = self.height_feet.unwrap_or(0.0);
            let inches = self.height_inches.unwrap_or(0.0);
            self.height_cm = Some(feet_inches_to_cm(feet, inches));
            self.height_unit = Some(HeightUnit::FeetInches);
        }

        if metric_weight {
            self.weight_lbs = self.weight_kg.map(kg_to_lbs);
            self.weight_unit = Some(WeightUnit::Kg);
        } else if imperial_weight {
            self.weight_kg = self.weight_lbs.map(lbs_to_kg);
            self.weight_unit = Some(WeightUnit::Lbs);
        }
    }

    /// Height in cm, from the metric value or the imperial components
    pub fn resolved_height_cm(&self) -> Option<f64> {
        self.height_cm.filter(|cm| *cm > 0.0).or_else(|| {
            self.height_feet
                .filter(|feet| *feet > 0.0)
                .map(|feet| feet_inches_to_cm(feet, self.height_inches.unwrap_or(0.0)))
        })
    }

    /// Weight in kg, from the metric value or pounds
    pub fn resolved_weight_kg(&self) -> Option<f64> {
        self.weight_kg
            .filter(|kg| *kg > 0.0)
            .or_else(|| self.weight_lbs.filter(|lbs| *lbs > 0.0).map(lbs_to_kg))
    }

    /// Calculator inputs that are still absent or non-positive
    pub fn missing_required_fields(&self) -> Vec<String> {
        let checks = [
            ("sex", self.sex.is_some()),
            ("age", self.age.is_some_and(|age| age > 0)),
            ("height", self.resolved_height_cm().is_some()),
            ("weight", self.resolved_weight_kg().is_some()),
            ("activity_level", self.activity_level.is_some()),
            ("goal", self.goal.is_some()),
            ("meals_per_day", self.meals_per_day.is_some()),
        ];
        checks
            .iter()
            .filter(|(_, present)| !present)
            .map(|(field, _)| field.to_string())
            .collect()
    }

    /// Range-check every field that is set
    pub fn validate_fields(&self) -> Result<(), ProfileError> {
        if let Err(errors) = self.validate() {
            let field_errors = errors.field_errors();
            let mut fields: Vec<_> = field_errors.iter().collect();
            fields.sort_by_key(|(field, _)| field.to_string());
            if let Some((field, errs)) = fields.first() {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string());
                return Err(ProfileError::Validation {
                    field: field.to_string(),
                    message,
                });
            }
        }

        for (field, value) in [("wake_up_time", &self.wake_up_time), ("bed_time", &self.bed_time)] {
            if let Some(time) = value {
                validate_clock_time(time).map_err(|message| ProfileError::Validation {
                    field: field.to_string(),
                    message,
                })?;
            }
        }

        Ok(())
    }

    /// Build a complete profile
    ///
    /// Fails when a calculator input is missing; lifestyle fields that were
    /// never answered take their defaults.
    pub fn into_profile(&self, id: Uuid, now: DateTime<Utc>) -> Result<UserProfile, ProfileError> {
        let missing = self.missing_required_fields();
        if !missing.is_empty() {
            return Err(ProfileError::Incomplete(missing));
        }
        self.validate_fields()?;

        let incomplete = |field: &str| ProfileError::Incomplete(vec![field.to_string()]);

        let height_cm = self.resolved_height_cm().ok_or_else(|| incomplete("height"))?;
        // Derived from the canonical cm so fractional feet or inches never disagree with it
        let height_imperial = self.height_feet.map(|_| cm_to_feet_inches(height_cm));

        Ok(UserProfile {
            id,
            sex: self.sex.ok_or_else(|| incomplete("sex"))?,
            age: self.age.ok_or_else(|| incomplete("age"))?,
            height_cm,
            weight_kg: self.resolved_weight_kg().ok_or_else(|| incomplete("weight"))?,
            body_fat_percentage: self.body_fat_percentage,
            activity_level: self.activity_level.ok_or_else(|| incomplete("activity_level"))?,
            goal: self.goal.ok_or_else(|| incomplete("goal"))?,
            training_days_per_week: self.training_days_per_week.unwrap_or(DEFAULT_TRAINING_DAYS),
            dietary_preference: self.dietary_preference.unwrap_or_default(),
            allergies: self.allergies.clone().unwrap_or_default(),
            budget: self.budget.unwrap_or_default(),
            cooking_skill: self.cooking_skill.unwrap_or_default(),
            meals_per_day: self.meals_per_day.ok_or_else(|| incomplete("meals_per_day"))?,
            wake_up_time: self
                .wake_up_time
                .clone()
                .unwrap_or_else(|| DEFAULT_WAKE_UP_TIME.to_string()),
            bed_time: self
                .bed_time
                .clone()
                .unwrap_or_else(|| DEFAULT_BED_TIME.to_string()),
            height_imperial,
            weight_lbs: self.weight_lbs,
            height_unit: self.height_unit.unwrap_or_default(),
            weight_unit: self.weight_unit.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
}

impl From<&UserProfile> for OnboardingData {
    fn from(profile: &UserProfile) -> Self {
        Self {
            sex: Some(profile.sex),
            age: Some(profile.age),
            height_feet: profile.height_imperial.map(|h| h.feet as f64),
            height_inches: profile.height_imperial.map(|h| h.inches as f64),
            height_cm: Some(profile.height_cm),
            weight_lbs: profile.weight_lbs,
            weight_kg: Some(profile.weight_kg),
            body_fat_percentage: profile.body_fat_percentage,
            activity_level: Some(profile.activity_level),
            goal: Some(profile.goal),
            training_days_per_week: Some(profile.training_days_per_week),
            dietary_preference: Some(profile.dietary_preference),
            allergies: Some(profile.allergies.clone()),
            budget: Some(profile.budget),
            cooking_skill: Some(profile.cooking_skill),
            meals_per_day: Some(profile.meals_per_day),
            wake_up_time: Some(profile.wake_up_time.clone()),
            bed_time: Some(profile.bed_time.clone()),
            height_unit: Some(profile.height_unit),
            weight_unit: Some(profile.weight_unit),
        }
    }
}

// ============================================================================
// Workflow State
// ============================================================================

/// Where a user is in the questionnaire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnboardingState {
    pub current_step: usize,
    pub data: OnboardingData,
    pub complete: bool,
}

impl OnboardingState {
    pub fn step(&self) -> OnboardingStep {
        OnboardingStep::from_index(self.current_step).unwrap_or(OnboardingStep::Schedule)
    }

    pub fn can_proceed(&self) -> bool {
        self.step().can_proceed(&self.data)
    }

    pub fn progress_percent(&self) -> f64 {
        (self.current_step + 1) as f64 / OnboardingStep::TOTAL as f64 * 100.0
    }

    /// Move to the next step if the current one is answered
    pub fn advance(&mut self) -> Result<OnboardingStep, ProfileError> {
        let step = self.step();
        if !step.can_proceed(&self.data) {
            return Err(ProfileError::Incomplete(
                step.fields().iter().map(|f| f.to_string()).collect(),
            ));
        }
        if !step.is_last() {
            self.current_step += 1;
        }
        Ok(self.step())
    }

    pub fn back(&mut self) -> OnboardingStep {
        self.current_step = self.current_step.saturating_sub(1);
        self.step()
    }

    /// Finish the questionnaire from its last step
    pub fn complete(&mut self, id: Uuid, now: DateTime<Utc>) -> Result<UserProfile, ProfileError> {
        let step = self.step();
        if !step.is_last() {
            return Err(ProfileError::NotFinished {
                step: self.current_step + 1,
                total: OnboardingStep::TOTAL,
            });
        }
        if !step.can_proceed(&self.data) {
            return Err(ProfileError::Incomplete(
                step.fields().iter().map(|f| f.to_string()).collect(),
            ));
        }
        let profile = self.data.into_profile(id, now)?;
        self.complete = true;
        Ok(profile)
    }
}
