use sqlx::PgPool;

use std::sync::Arc;

use menupress::services::ImageStore;

use crate::web::security::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub images: ImageStore,
    pub rate_limiter: Arc<RateLimiter>,
    /// Business the bare /carta route redirects to, when configured.
    pub default_slug: Option<String>,
}
