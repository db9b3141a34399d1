//! PostgreSQL user store
//!
//! Value objects are stored as JSONB columns. Edits lock the row with
//! `SELECT ... FOR UPDATE` and write it back in the same transaction.

use super::{RecordEdit, UserRecord, UserStore};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use macromasters_shared::{MacroCalculation, OnboardingState, UserProfile, UserStats};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    onboarding: Json<OnboardingState>,
    profile: Option<Json<UserProfile>>,
    macros: Option<Json<MacroCalculation>>,
    stats: Json<UserStats>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            onboarding: row.onboarding.0,
            profile: row.profile.map(|p| p.0),
            macros: row.macros.map(|m| m.0),
            stats: row.stats.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// User store backed by the `users` table
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, record: &UserRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, onboarding, profile, macros, stats, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id)
        .bind(Json(&record.onboarding))
        .bind(record.profile.as_ref().map(Json))
        .bind(record.macros.as_ref().map(Json))
        .bind(Json(&record.stats))
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, onboarding, profile, macros, stats, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRecord::from))
    }

    async fn modify(&self, id: Uuid, edit: RecordEdit<'_>) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, onboarding, profile, macros, stats, created_at, updated_at
            FROM users
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(false);
        };

        let mut record = UserRecord::from(row);
        if !edit(&mut record) {
            tx.rollback().await?;
            return Ok(true);
        }

        sqlx::query(
            r#"
            UPDATE users
            SET onboarding = $2, profile = $3, macros = $4, stats = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(Json(&record.onboarding))
        .bind(record.profile.as_ref().map(Json))
        .bind(record.macros.as_ref().map(Json))
        .bind(Json(&record.stats))
        .bind(record.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<()> {
        crate::db::health_check(&self.pool).await
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
