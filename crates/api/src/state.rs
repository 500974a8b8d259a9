use std::sync::Arc;

use crate::cache::FilterOptionsCache;
use crate::config::ServerConfig;
use crate::media::MediaStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: kinoteka_db::DbPool,
    /// Server configuration (JWT secrets, CORS origins, media root).
    pub config: Arc<ServerConfig>,
    /// TTL cache backing the filter-option endpoints.
    pub filter_cache: Arc<FilterOptionsCache>,
    /// Uploaded-media storage rooted at `MEDIA_ROOT`.
    pub media: Arc<MediaStore>,
}

impl AppState {
    pub fn new(pool: kinoteka_db::DbPool, config: ServerConfig) -> Self {
        let media = Arc::new(MediaStore::new(config.media_root.clone()));
        Self {
            pool,
            config: Arc::new(config),
            filter_cache: Arc::new(FilterOptionsCache::new()),
            media,
        }
    }
}
