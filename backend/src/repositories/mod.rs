//! User record storage
//!
//! A [`UserStore`] persists one [`UserRecord`] per user: onboarding progress,
//! the completed profile, the plan derived from it and engagement stats.
//! Stores only move records in and out; every derived value is computed by
//! the services inside a [`UserStore::modify`] edit, so concurrent writers
//! never overwrite each other's fields.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use macromasters_shared::types::UserResponse;
use macromasters_shared::{MacroCalculation, OnboardingState, UserProfile, UserStats};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything stored for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub onboarding: OnboardingState,
    pub profile: Option<UserProfile>,
    /// Present exactly when `profile` is, and always computed from it
    pub macros: Option<MacroCalculation>,
    pub stats: UserStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Fresh user at the first onboarding step
    pub fn new(id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            onboarding: OnboardingState::default(),
            profile: None,
            macros: None,
            stats: UserStats::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the profile and its plan together
    pub fn set_profile(&mut self, profile: UserProfile) {
        self.macros = Some(profile.macros());
        self.profile = Some(profile);
    }

    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id.to_string(),
            onboarding_complete: self.onboarding.complete,
            profile: self.profile.clone(),
            macros: self.macros,
            stats: self.stats.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// In-place edit of a stored record; returns whether to keep the result
pub type RecordEdit<'a> = Box<dyn FnOnce(&mut UserRecord) -> bool + Send + 'a>;

/// Persistence for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new record; fails if the id is taken
    async fn create(&self, record: &UserRecord) -> Result<()>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>>;

    /// Run `edit` on a record while no other writer can touch it
    ///
    /// The edited record is written back only when `edit` returns true.
    /// Returns false when the record does not exist.
    async fn modify(&self, id: Uuid, edit: RecordEdit<'_>) -> Result<bool>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn health_check(&self) -> Result<()>;

    /// Short name used in health output and logs
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use macromasters_shared::{
        ActivityLevel, BiologicalSex, Goal, MealsPerDay, OnboardingData,
    };

    #[test]
    fn test_new_record_is_empty() {
        let now = Utc::now();
        let record = UserRecord::new(Uuid::nil(), now);
        assert!(record.profile.is_none());
        assert!(record.macros.is_none());
        assert_eq!(record.stats.level, 1);
        assert_eq!(record.onboarding.current_step, 0);
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_set_profile_recomputes_macros() {
        let data = OnboardingData {
            sex: Some(BiologicalSex::Male),
            age: Some(30),
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            activity_level: Some(ActivityLevel::Moderate),
            goal: Some(Goal::Recomp),
            meals_per_day: Some(MealsPerDay::default()),
            ..Default::default()
        };
        let mut record = UserRecord::new(Uuid::nil(), Utc::now());
        let profile = data.into_profile(record.id, Utc::now()).unwrap();
        record.set_profile(profile.clone());
        assert_eq!(record.macros, Some(profile.macros()));
        assert_eq!(record.macros.unwrap().daily_calories, 2759);
    }
}
