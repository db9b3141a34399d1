//! Onboarding service - questionnaire progress and completion
//!
//! Completion is the only path from collected answers to a stored profile:
//! the answers are normalized, checked, turned into a [`UserProfile`] and
//! the plan is computed and stored alongside it.

use super::{load_user, modify_user};
use crate::error::ApiError;
use crate::repositories::{UserRecord, UserStore};
use chrono::Utc;
use macromasters_shared::types::{CompleteOnboardingResponse, OnboardingStateResponse};
use macromasters_shared::{MacroCalculation, OnboardingData, ProfileError, UserProfile};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct OnboardingService;

impl OnboardingService {
    pub async fn get_state(
        store: &dyn UserStore,
        user_id: Uuid,
    ) -> Result<OnboardingStateResponse, ApiError> {
        let record = load_user(store, user_id).await?;
        Ok(OnboardingStateResponse::from(&record.onboarding))
    }

    /// Merge answers into the user's onboarding data
    ///
    /// The merged record is range-checked before it is stored, so a bad
    /// value is rejected at the step that collected it.
    pub async fn update_data(
        store: &dyn UserStore,
        user_id: Uuid,
        patch: OnboardingData,
    ) -> Result<OnboardingStateResponse, ApiError> {
        let state = modify_user(store, user_id, |record| {
            ensure_in_progress(record)?;

            let mut data = record.onboarding.data.clone();
            data.apply(patch);
            data.validate_fields()?;

            record.onboarding.data = data;
            Ok(OnboardingStateResponse::from(&record.onboarding))
        })
        .await?;

        debug!(user_id = %user_id, step = state.current_step, "Onboarding data updated");
        Ok(state)
    }

    /// Advance one step; rejected while the current step is unanswered
    pub async fn next_step(
        store: &dyn UserStore,
        user_id: Uuid,
    ) -> Result<OnboardingStateResponse, ApiError> {
        let state = modify_user(store, user_id, |record| {
            ensure_in_progress(record)?;
            record.onboarding.advance()?;
            Ok(OnboardingStateResponse::from(&record.onboarding))
        })
        .await?;

        debug!(user_id = %user_id, step = ?state.step, "Onboarding advanced");
        Ok(state)
    }

    pub async fn previous_step(
        store: &dyn UserStore,
        user_id: Uuid,
    ) -> Result<OnboardingStateResponse, ApiError> {
        let state = modify_user(store, user_id, |record| {
            ensure_in_progress(record)?;
            record.onboarding.back();
            Ok(OnboardingStateResponse::from(&record.onboarding))
        })
        .await?;

        debug!(user_id = %user_id, step = ?state.step, "Onboarding went back");
        Ok(state)
    }

    /// Finish onboarding: build the profile and compute its plan
    pub async fn complete(
        store: &dyn UserStore,
        user_id: Uuid,
    ) -> Result<CompleteOnboardingResponse, ApiError> {
        let (profile, macros) = modify_user(store, user_id, |record| {
            ensure_in_progress(record)?;

            let profile = match record.onboarding.complete(user_id, Utc::now()) {
                Ok(profile) => profile,
                Err(err) => {
                    warn!(user_id = %user_id, error = %err, "Onboarding completion rejected");
                    return Err(err.into());
                }
            };

            record.set_profile(profile);
            stored_plan(record)
        })
        .await?;

        info!(
            user_id = %user_id,
            daily_calories = macros.daily_calories,
            protein = macros.protein,
            carbs = macros.carbs,
            fats = macros.fats,
            "Onboarding complete, plan calculated"
        );

        Ok(CompleteOnboardingResponse { profile, macros })
    }
}

fn ensure_in_progress(record: &UserRecord) -> Result<(), ApiError> {
    if record.onboarding.complete {
        return Err(ApiError::Conflict(
            "Onboarding already complete; edit the profile instead".to_string(),
        ));
    }
    Ok(())
}

/// Profile and plan from a record that just had its profile set
fn stored_plan(record: &UserRecord) -> Result<(UserProfile, MacroCalculation), ApiError> {
    match (&record.profile, record.macros) {
        (Some(profile), Some(macros)) => Ok((profile.clone(), macros)),
        _ => Err(ProfileError::Incomplete(vec!["profile".to_string()]).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryUserStore;
    use crate::services::UserService;
    use macromasters_shared::{
        ActivityLevel, BiologicalSex, Budget, CookingSkill, DietaryPreference, Goal, MealsPerDay,
        OnboardingStep,
    };

    async fn new_user(store: &InMemoryUserStore) -> Uuid {
        UserService::create(store).await.unwrap().id.parse().unwrap()
    }

    fn scenario_two() -> OnboardingData {
        OnboardingData {
            sex: Some(BiologicalSex::Female),
            age: Some(25),
            height_cm: Some(165.0),
            weight_kg: Some(60.0),
            activity_level: Some(ActivityLevel::Sedentary),
            goal: Some(Goal::FatLoss),
            meals_per_day: Some(MealsPerDay::new(3).unwrap()),
            training_days_per_week: Some(3),
            dietary_preference: Some(DietaryPreference::Vegetarian),
            budget: Some(Budget::Low),
            cooking_skill: Some(CookingSkill::Beginner),
            wake_up_time: Some("06:30".to_string()),
            bed_time: Some("22:30".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_next_blocked_until_answered() {
        let store = InMemoryUserStore::new();
        let id = new_user(&store).await;

        let err = OnboardingService::next_step(&store, id).await.unwrap_err();
        assert!(matches!(err, ApiError::Incomplete(ref f) if f == &["sex"]));

        OnboardingService::update_data(
            &store,
            id,
            OnboardingData {
                sex: Some(BiologicalSex::Male),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let state = OnboardingService::next_step(&store, id).await.unwrap();
        assert_eq!(state.step, OnboardingStep::Age);
    }

    #[tokio::test]
    async fn test_update_rejects_out_of_range() {
        let store = InMemoryUserStore::new();
        let id = new_user(&store).await;

        let err = OnboardingService::update_data(
            &store,
            id,
            OnboardingData {
                weight_kg: Some(5.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::FieldValidation { ref field, .. } if field == "weight_kg"));

        let state = OnboardingService::get_state(&store, id).await.unwrap();
        assert!(state.data.weight_kg.is_none());
    }

    #[tokio::test]
    async fn test_complete_from_last_step() {
        let store = InMemoryUserStore::new();
        let id = new_user(&store).await;
        OnboardingService::update_data(&store, id, scenario_two()).await.unwrap();

        assert!(matches!(
            OnboardingService::complete(&store, id).await,
            Err(ApiError::BadRequest(_))
        ));

        for _ in 0..OnboardingStep::TOTAL - 1 {
            OnboardingService::next_step(&store, id).await.unwrap();
        }
        let done = OnboardingService::complete(&store, id).await.unwrap();
        assert_eq!(done.macros.bmr, 1345);
        assert_eq!(done.macros.tdee, 1614);
        assert_eq!(done.macros.daily_calories, 1291);
        assert_eq!(done.macros.protein, 108);

        let record = store.find_by_id(id).await.unwrap().unwrap();
        assert!(record.onboarding.complete);
        assert_eq!(record.macros, Some(done.macros));

        assert!(matches!(
            OnboardingService::next_step(&store, id).await,
            Err(ApiError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let store = InMemoryUserStore::new();
        assert!(matches!(
            OnboardingService::get_state(&store, Uuid::new_v4()).await,
            Err(ApiError::NotFound(_))
        ));
    }
}
