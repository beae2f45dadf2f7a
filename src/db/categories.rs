use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Category;

pub async fn list_categories_for_business(
    pool: &PgPool,
    business_id: Uuid,
) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT *
        FROM categories
        WHERE business_id = $1
        ORDER BY position ASC, id ASC
        "#,
    )
    .bind(business_id)
    .fetch_all(pool)
    .await
}

/// Only visible categories populate the admin form's selector.
pub async fn list_visible_categories_for_business(
    pool: &PgPool,
    business_id: Uuid,
) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT *
        FROM categories
        WHERE business_id = $1 AND visible = TRUE
        ORDER BY position ASC, id ASC
        "#,
    )
    .bind(business_id)
    .fetch_all(pool)
    .await
}

/// New categories are visible by default.
pub async fn create_category(
    pool: &PgPool,
    business_id: Uuid,
    name: &str,
) -> Result<Category, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (business_id, name)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(business_id)
    .bind(name)
    .fetch_one(pool)
    .await
}

pub async fn set_category_visible(
    pool: &PgPool,
    id: i64,
    business_id: Uuid,
    visible: bool,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE categories
        SET visible = $1
        WHERE id = $2 AND business_id = $3
        "#,
    )
    .bind(visible)
    .bind(id)
    .bind(business_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
