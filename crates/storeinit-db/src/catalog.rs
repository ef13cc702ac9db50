//! Database operations for `product_product`, `product_productvariant`, and
//! variant attribute assignments.

use sqlx::PgPool;

use crate::DbError;

/// A row from the `product_productvariant` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VariantRow {
    pub id: i64,
    pub product_id: i64,
    /// Display name. Empty for variants created without one.
    pub name: String,
    pub sku: Option<String>,
}

/// Counts rows in `product_product`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_products(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product_product")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Lists every variant in the store, ordered by `id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_variants(pool: &PgPool) -> Result<Vec<VariantRow>, DbError> {
    let rows = sqlx::query_as::<_, VariantRow>(
        "SELECT id, product_id, name, sku \
         FROM product_productvariant \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Names of every attribute value assigned to a variant.
///
/// Ordered by assignment, then by the value's position within the
/// assignment. Assignments that carry no values contribute nothing.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_variant_value_names(
    pool: &PgPool,
    variant_id: i64,
) -> Result<Vec<String>, DbError> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT v.name \
         FROM attribute_assignedvariantattribute a \
         JOIN attribute_assignedvariantattributevalue av ON av.assignment_id = a.id \
         JOIN attribute_attributevalue v ON v.id = av.value_id \
         WHERE a.variant_id = $1 \
         ORDER BY a.id, av.sort_order NULLS LAST, av.id",
    )
    .bind(variant_id)
    .fetch_all(pool)
    .await?;
    Ok(names)
}

/// IDs of a product's variants in display order.
///
/// Ordered by `sort_order` (unset last), then `sku`, then `id`, so a
/// variant's position is stable between runs.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_product_variant_ids(pool: &PgPool, product_id: i64) -> Result<Vec<i64>, DbError> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT id \
         FROM product_productvariant \
         WHERE product_id = $1 \
         ORDER BY sort_order NULLS LAST, sku NULLS LAST, id",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

/// Sets a variant's display name.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no variant has `variant_id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn rename_variant(pool: &PgPool, variant_id: i64, name: &str) -> Result<(), DbError> {
    let rows_affected = sqlx::query(
        "UPDATE product_productvariant \
         SET name = $2, updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(variant_id)
    .bind(name)
    .execute(pool)
    .await?
    .rows_affected();

    if rows_affected == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
