use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Product, ProductFields};

// Every product read resolves category_id into category_name so callers
// never have to join on their own.
const PRODUCT_SELECT: &str = r#"
    SELECT
        p.id, p.business_id, p.name, p.description, p.price,
        p.has_discount, p.discount_price, p.best_seller,
        p.category, p.category_id, c.name AS category_name,
        p.image_url, p.active, p.deleted, p.created_at, p.edited_at
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// Admin listing: everything not soft-deleted, oldest first.
pub async fn list_products_for_business(
    pool: &PgPool,
    business_id: Uuid,
) -> Result<Vec<Product>, sqlx::Error> {
    let query = format!(
        "{PRODUCT_SELECT} WHERE p.business_id = $1 AND p.deleted = FALSE ORDER BY p.id ASC"
    );

    sqlx::query_as::<_, Product>(&query)
        .bind(business_id)
        .fetch_all(pool)
        .await
}

/// Public menu listing: active, not soft-deleted, ordered by the legacy
/// category text so rows arrive roughly pre-grouped.
pub async fn list_menu_products_for_business(
    pool: &PgPool,
    business_id: Uuid,
) -> Result<Vec<Product>, sqlx::Error> {
    let query = format!(
        "{PRODUCT_SELECT}
         WHERE p.business_id = $1 AND p.active = TRUE AND p.deleted = FALSE
         ORDER BY p.category ASC, p.id ASC"
    );

    sqlx::query_as::<_, Product>(&query)
        .bind(business_id)
        .fetch_all(pool)
        .await
}

/// Soft-deleted rows are invisible here too.
pub async fn get_product_by_id(
    pool: &PgPool,
    id: i64,
) -> Result<Option<Product>, sqlx::Error> {
    let query = format!("{PRODUCT_SELECT} WHERE p.id = $1 AND p.deleted = FALSE");

    sqlx::query_as::<_, Product>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Inserts the row and returns the generated id; the caller needs it to
/// build the image storage key before patching in the URL. New products
/// start visible.
pub async fn create_product(
    pool: &PgPool,
    business_id: Uuid,
    fields: &ProductFields,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO products
            (business_id, name, description, price, has_discount,
             discount_price, best_seller, category_id, active, deleted)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, FALSE)
        RETURNING id
        "#,
    )
    .bind(business_id)
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(fields.price)
    .bind(fields.has_discount)
    .bind(fields.discount_price)
    .bind(fields.best_seller)
    .bind(fields.category_id)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Overwrites the editable fields. `active` and `deleted` are absent from
/// the column list on purpose: resubmitting an edit form must never
/// revert moderation state. Returns false when no row matched (missing,
/// deleted, or owned by another business).
pub async fn update_product(
    pool: &PgPool,
    id: i64,
    business_id: Uuid,
    fields: &ProductFields,
    image_url: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE products
        SET
            name = $1,
            description = $2,
            price = $3,
            has_discount = $4,
            discount_price = $5,
            best_seller = $6,
            category_id = $7,
            image_url = COALESCE($8, image_url),
            edited_at = now()
        WHERE id = $9 AND business_id = $10 AND deleted = FALSE
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(fields.price)
    .bind(fields.has_discount)
    .bind(fields.discount_price)
    .bind(fields.best_seller)
    .bind(fields.category_id)
    .bind(image_url)
    .bind(id)
    .bind(business_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn set_product_active(
    pool: &PgPool,
    id: i64,
    business_id: Uuid,
    active: bool,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE products
        SET active = $1, edited_at = now()
        WHERE id = $2 AND business_id = $3 AND deleted = FALSE
        "#,
    )
    .bind(active)
    .bind(id)
    .bind(business_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn set_product_image_url(
    pool: &PgPool,
    id: i64,
    image_url: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE products
        SET image_url = $1, edited_at = now()
        WHERE id = $2
        "#,
    )
    .bind(image_url)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Soft delete. The row stays for auditing but no listing may return it
/// again.
pub async fn soft_delete_product(
    pool: &PgPool,
    id: i64,
    business_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE products
        SET deleted = TRUE, edited_at = now()
        WHERE id = $1 AND business_id = $2 AND deleted = FALSE
        "#,
    )
    .bind(id)
    .bind(business_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
