//! Profile service - business logic for completed profiles
//!
//! A profile edit never patches the stored plan: the edited answers are
//! rebuilt into a new profile and the plan is recomputed from scratch.

use super::{load_user, modify_user};
use crate::error::ApiError;
use crate::repositories::{UserRecord, UserStore};
use chrono::Utc;
use macromasters_shared::types::{ProfileResponse, UpdateProfileRequest};
use macromasters_shared::{MacroCalculation, OnboardingData};
use tracing::info;
use uuid::Uuid;

pub struct ProfileService;

impl ProfileService {
    pub async fn get_profile(store: &dyn UserStore, user_id: Uuid) -> Result<ProfileResponse, ApiError> {
        let record = load_user(store, user_id).await?;
        profile_response(&record)
    }

    /// Apply edits to a completed profile and recompute its plan
    pub async fn update_profile(
        store: &dyn UserStore,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<ProfileResponse, ApiError> {
        let (previous_calories, response) = modify_user(store, user_id, |record| {
            let current = record.profile.as_ref().ok_or_else(|| {
                ApiError::NotFound("Profile not found; finish onboarding first".to_string())
            })?;

            let created_at = current.created_at;
            let mut data = OnboardingData::from(current);
            data.apply(req);

            let mut profile = data.into_profile(user_id, Utc::now())?;
            profile.created_at = created_at;

            let previous_calories = record.macros.map(|m| m.daily_calories);
            record.onboarding.data = data;
            record.set_profile(profile);
            Ok((previous_calories, profile_response(record)?))
        })
        .await?;

        info!(
            user_id = %user_id,
            previous_calories = ?previous_calories,
            daily_calories = response.macros.daily_calories,
            "Profile updated, plan recalculated"
        );
        Ok(response)
    }

    pub async fn get_macros(store: &dyn UserStore, user_id: Uuid) -> Result<MacroCalculation, ApiError> {
        let record = load_user(store, user_id).await?;
        Ok(profile_response(&record)?.macros)
    }
}

fn profile_response(record: &UserRecord) -> Result<ProfileResponse, ApiError> {
    match (&record.profile, record.macros) {
        (Some(profile), Some(macros)) => Ok(ProfileResponse::new(profile.clone(), macros)),
        _ => Err(ApiError::NotFound(
            "Profile not found; finish onboarding first".to_string(),
        )),
    }
}
