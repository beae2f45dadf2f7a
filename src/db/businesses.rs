use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Business;

/// Resolves the business managed by the signed-in user. `None` is a
/// normal outcome (account without a business), not an error.
pub async fn find_business_by_owner(
    pool: &PgPool,
    owner_user_id: Uuid,
) -> Result<Option<Business>, sqlx::Error> {
    sqlx::query_as::<_, Business>(
        r#"
        SELECT *
        FROM businesses
        WHERE owner_user_id = $1
        "#,
    )
    .bind(owner_user_id)
    .fetch_optional(pool)
    .await
}

/// Public menu lookup key.
pub async fn find_business_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<Business>, sqlx::Error> {
    sqlx::query_as::<_, Business>(
        r#"
        SELECT *
        FROM businesses
        WHERE slug = $1
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
}
