//! Business logic services
//!
//! Services own every edit to user records and are the
//! only place the calculator is invoked for stored profiles.

pub mod calculator;
pub mod onboarding;
pub mod profile;
pub mod stats;
pub mod user;

pub use calculator::CalculatorService;
pub use onboarding::OnboardingService;
pub use profile::ProfileService;
pub use stats::StatsService;
pub use user::UserService;

use crate::error::ApiError;
use crate::repositories::{UserRecord, UserStore};
use chrono::Utc;
use uuid::Uuid;

/// Load a user record or fail with 404
pub(crate) async fn load_user(store: &dyn UserStore, user_id: Uuid) -> Result<UserRecord, ApiError> {
    store
        .find_by_id(user_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

/// Apply `edit` to a user record atomically and stamp `updated_at`
///
/// Nothing is written when `edit` fails; its error is returned as is.
pub(crate) async fn modify_user<T, F>(store: &dyn UserStore, user_id: Uuid, edit: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut UserRecord) -> Result<T, ApiError> + Send,
    T: Send,
{
    let mut outcome = None;
    let found = store
        .modify(
            user_id,
            Box::new(|record: &mut UserRecord| {
                let result = edit(record);
                let keep = result.is_ok();
                if keep {
                    record.updated_at = Utc::now();
                }
                outcome = Some(result);
                keep
            }),
        )
        .await
        .map_err(ApiError::Internal)?;

    match outcome {
        Some(result) if found => result,
        _ => Err(ApiError::NotFound("User not found".to_string())),
    }
}
