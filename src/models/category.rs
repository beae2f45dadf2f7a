use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub business_id: Uuid,
    pub name: String,
    pub position: i32,
    /// Hidden categories stay out of the admin form's selector.
    pub visible: bool,
    pub created_at: DateTime<Utc>,
}
