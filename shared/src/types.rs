//! API request and response types

use crate::gamification::{LevelProgress, UserStats};
use crate::macros::MacroCalculation;
use crate::onboarding::{OnboardingData, OnboardingState, OnboardingStep};
use crate::profile::{ActivityLevel, BiologicalSex, Goal, MealsPerDay, UserProfile};
use crate::units::FeetInchesHeight;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

// ============================================================================
// User Types
// ============================================================================

/// User summary response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub onboarding_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macros: Option<MacroCalculation>,
    pub stats: UserStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Onboarding Types
// ============================================================================

/// Onboarding progress response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingStateResponse {
    pub current_step: usize,
    pub step: OnboardingStep,
    pub total_steps: usize,
    pub progress_percent: f64,
    pub can_proceed: bool,
    pub complete: bool,
    pub data: OnboardingData,
    /// Calculator inputs still needed before completion
    pub missing_fields: Vec<String>,
}

impl From<&OnboardingState> for OnboardingStateResponse {
    fn from(state: &OnboardingState) -> Self {
        Self {
            current_step: state.current_step,
            step: state.step(),
            total_steps: OnboardingStep::TOTAL,
            progress_percent: state.progress_percent(),
            can_proceed: state.can_proceed(),
            complete: state.complete,
            data: state.data.clone(),
            missing_fields: state.data.missing_required_fields(),
        }
    }
}

/// Result of finishing onboarding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteOnboardingResponse {
    pub profile: UserProfile,
    pub macros: MacroCalculation,
}

// ============================================================================
// Profile Types
// ============================================================================

/// Profile update request
///
/// Absent fields keep their current value; the result is validated and the
/// macro plan recomputed from scratch.
pub type UpdateProfileRequest = OnboardingData;

/// Profile with its derived plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    pub macros: MacroCalculation,
    /// Height and weight in the units the user last entered them in
    pub height_display: String,
    pub weight_display: String,
}

impl ProfileResponse {
    pub fn new(profile: UserProfile, macros: MacroCalculation) -> Self {
        Self {
            height_display: profile.height_display(),
            weight_display: profile.weight_display(),
            profile,
            macros,
        }
    }
}

// ============================================================================
// Calculator Types
// ============================================================================

/// Stateless macro calculation request (metric inputs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateMacrosRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub sex: BiologicalSex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    #[serde(default)]
    pub meals_per_day: MealsPerDay,
}

/// Height conversion query; either `cm` or `feet` (with optional `inches`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeightConversionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feet: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inches: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeightConversionResponse {
    pub cm: f64,
    pub imperial: FeetInchesHeight,
    pub display: String,
}

/// Weight conversion query; either `kg` or `lbs`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightConversionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lbs: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightConversionResponse {
    pub kg: f64,
    pub lbs: f64,
}

// ============================================================================
// Stats Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub stats: UserStats,
    pub progress: LevelProgress,
}

impl From<&UserStats> for StatsResponse {
    fn from(stats: &UserStats) -> Self {
        Self {
            stats: stats.clone(),
            progress: stats.progress(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddXpRequest {
    pub amount: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddBadgeRequest {
    pub badge: String,
}

/// Badge award result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddBadgeResponse {
    pub awarded: bool,
    pub stats: UserStats,
}
