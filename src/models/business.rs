use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The merchant whose menu is being managed and displayed. Rows are
/// created and edited outside this codebase; here they are read-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Business {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub name: String,
    /// Stable URL-safe key the public menu page is looked up by.
    pub slug: String,
    pub cover_url: Option<String>,
    pub profile_url: Option<String>,
    pub address: Option<String>,
    pub opens_at: Option<NaiveTime>,
    pub closes_at: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}
