//! Database operations for `warehouse_warehouse` and `warehouse_stock`.

use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `warehouse_warehouse` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct WarehouseRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// A row from the `warehouse_stock` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StockRow {
    pub id: i64,
    pub warehouse_id: Uuid,
    pub product_variant_id: i64,
    pub quantity: i32,
    pub quantity_allocated: i32,
}

/// Returns the first warehouse ordered by `slug`, then `id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn first_warehouse(pool: &PgPool) -> Result<Option<WarehouseRow>, DbError> {
    let row = sqlx::query_as::<_, WarehouseRow>(
        "SELECT id, name, slug \
         FROM warehouse_warehouse \
         ORDER BY slug, id \
         LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Upserts the stock row for `(warehouse_id, variant_id)`.
///
/// Conflicts on `(warehouse_id, product_variant_id)` overwrite `quantity`;
/// `quantity_allocated` is left alone.
///
/// Returns `true` if a new row was inserted, `false` if an existing one was
/// updated.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_stock(
    pool: &PgPool,
    warehouse_id: Uuid,
    variant_id: i64,
    quantity: i32,
) -> Result<bool, DbError> {
    // xmax is 0 only for rows created by this statement.
    let inserted = sqlx::query_scalar::<_, bool>(
        "INSERT INTO warehouse_stock (warehouse_id, product_variant_id, quantity) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (warehouse_id, product_variant_id) DO UPDATE SET \
             quantity = EXCLUDED.quantity \
         RETURNING (xmax = 0)",
    )
    .bind(warehouse_id)
    .bind(variant_id)
    .bind(quantity)
    .fetch_one(pool)
    .await?;
    Ok(inserted)
}

/// Returns the stock row for a variant at a warehouse, if one exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_stock(
    pool: &PgPool,
    warehouse_id: Uuid,
    variant_id: i64,
) -> Result<Option<StockRow>, DbError> {
    let row = sqlx::query_as::<_, StockRow>(
        "SELECT id, warehouse_id, product_variant_id, quantity, quantity_allocated \
         FROM warehouse_stock \
         WHERE warehouse_id = $1 AND product_variant_id = $2",
    )
    .bind(warehouse_id)
    .bind(variant_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
