//! User lifecycle: create, read, delete

use super::load_user;
use crate::error::ApiError;
use crate::repositories::{UserRecord, UserStore};
use chrono::Utc;
use macromasters_shared::types::UserResponse;
use tracing::info;
use uuid::Uuid;

pub struct UserService;

impl UserService {
    /// Create a user positioned at the first onboarding step
    pub async fn create(store: &dyn UserStore) -> Result<UserResponse, ApiError> {
        let record = UserRecord::new(Uuid::new_v4(), Utc::now());
        store.create(&record).await.map_err(ApiError::Internal)?;

        info!(user_id = %record.id, "User created");
        Ok(record.to_response())
    }

    pub async fn get(store: &dyn UserStore, user_id: Uuid) -> Result<UserResponse, ApiError> {
        let record = load_user(store, user_id).await?;
        Ok(record.to_response())
    }

    /// Remove the user and everything derived from their profile
    pub async fn delete(store: &dyn UserStore, user_id: Uuid) -> Result<(), ApiError> {
        let deleted = store.delete(user_id).await.map_err(ApiError::Internal)?;
        if !deleted {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}
