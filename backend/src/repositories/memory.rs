//! In-process user store

use super::{RecordEdit, UserRecord, UserStore};
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// User store held in memory; contents are lost on restart
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, record: &UserRecord) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&record.id) {
            bail!("user {} already exists", record.id);
        }
        users.insert(record.id, record.clone());
        debug!(user_id = %record.id, "User record created");
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn modify(&self, id: Uuid, edit: RecordEdit<'_>) -> Result<bool> {
        let mut users = self.users.write().await;
        let Some(existing) = users.get_mut(&id) else {
            return Ok(false);
        };

        let mut draft = existing.clone();
        if edit(&mut draft) {
            *existing = draft;
        }
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
