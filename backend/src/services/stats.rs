//! Stats service - XP, streaks and badges

use super::{load_user, modify_user};
use crate::error::ApiError;
use crate::repositories::UserStore;
use macromasters_shared::types::{AddBadgeResponse, StatsResponse};
use macromasters_shared::UserStats;
use tracing::{debug, info};
use uuid::Uuid;

const MAX_BADGE_LEN: usize = 64;

pub struct StatsService;

impl StatsService {
    pub async fn get_stats(store: &dyn UserStore, user_id: Uuid) -> Result<StatsResponse, ApiError> {
        let record = load_user(store, user_id).await?;
        Ok(StatsResponse::from(&record.stats))
    }

    pub async fn add_xp(store: &dyn UserStore, user_id: Uuid, amount: u32) -> Result<StatsResponse, ApiError> {
        if amount == 0 {
            return Err(ApiError::FieldValidation {
                field: "amount".to_string(),
                message: "XP amount must be positive".to_string(),
            });
        }

        let stats = Self::modify(store, user_id, |stats| stats.add_xp(amount)).await?;
        debug!(user_id = %user_id, amount, xp = stats.xp, level = stats.level, "XP added");
        Ok(StatsResponse::from(&stats))
    }

    pub async fn increment_streak(store: &dyn UserStore, user_id: Uuid) -> Result<StatsResponse, ApiError> {
        let stats = Self::modify(store, user_id, UserStats::increment_streak).await?;
        Ok(StatsResponse::from(&stats))
    }

    pub async fn reset_streak(store: &dyn UserStore, user_id: Uuid) -> Result<StatsResponse, ApiError> {
        let stats = Self::modify(store, user_id, UserStats::reset_streak).await?;
        Ok(StatsResponse::from(&stats))
    }

    /// Award a badge; awarding one the user already holds is a no-op
    pub async fn add_badge(
        store: &dyn UserStore,
        user_id: Uuid,
        badge: &str,
    ) -> Result<AddBadgeResponse, ApiError> {
        let badge = badge.trim();
        if badge.is_empty() || badge.len() > MAX_BADGE_LEN {
            return Err(ApiError::FieldValidation {
                field: "badge".to_string(),
                message: format!("Badge must be 1 to {} characters", MAX_BADGE_LEN),
            });
        }

        let mut awarded = false;
        let stats = Self::modify(store, user_id, |stats| awarded = stats.add_badge(badge)).await?;
        if awarded {
            info!(user_id = %user_id, badge, "Badge awarded");
        }
        Ok(AddBadgeResponse { awarded, stats })
    }

    async fn modify<F>(store: &dyn UserStore, user_id: Uuid, f: F) -> Result<UserStats, ApiError>
    where
        F: FnOnce(&mut UserStats) + Send,
    {
        modify_user(store, user_id, |record| {
            f(&mut record.stats);
            Ok(record.stats.clone())
        })
        .await
    }
}
