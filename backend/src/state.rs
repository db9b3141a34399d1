//! Application state management
//!
//! Shared state handed to every request handler via Axum's state
//! extraction. Cloning is two Arc increments.

use crate::config::AppConfig;
use crate::repositories::{InMemoryUserStore, UserStore};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// User record storage
    pub store: Arc<dyn UserStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(Arc::new(InMemoryUserStore::new()), config)
    }

    #[inline]
    pub fn store(&self) -> &dyn UserStore {
        self.store.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
