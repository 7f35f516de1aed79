use std::sync::Arc;

use platebook_core::names::UserNameCache;
use platebook_db::store::DiningStore;
use tokio::sync::RwLock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Places, dishes and user profiles.
    pub store: Arc<dyn DiningStore>,
    pub config: Arc<ServerConfig>,
    /// Author display names resolved so far. Only ever grows.
    pub names: Arc<RwLock<UserNameCache>>,
}

impl AppState {
    pub fn new(store: Arc<dyn DiningStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            names: Arc::new(RwLock::new(UserNameCache::new())),
        }
    }
}
