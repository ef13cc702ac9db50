use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use storeinit_core::catalog::{AttributeConfig, DemoCatalog, ProductConfig};
use uuid::Uuid;

use crate::DbError;

/// Row counts written by [`seed_demo_catalog`].
///
/// `channels` and `warehouses` count only newly inserted rows; existing
/// slugs are left alone and not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub channels: usize,
    pub warehouses: usize,
    pub attributes: usize,
    pub products: usize,
    pub variants: usize,
}

type ValueIds = HashMap<(String, String), i64>;

/// Upsert the demo catalog: channels, warehouses, attributes with their
/// values, products, variants, and variant attribute assignments.
///
/// All upserts run inside a single transaction; if any operation fails
/// the entire batch is rolled back. Existing rows are matched by slug (or
/// sku for variants) and keep their names, so re-seeding is harmless.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_demo_catalog(
    pool: &PgPool,
    catalog: &DemoCatalog,
) -> Result<SeedSummary, DbError> {
    let mut tx = pool.begin().await?;
    let mut summary = SeedSummary::default();

    for channel in &catalog.channels {
        let inserted = sqlx::query(
            "INSERT INTO channel_channel (name, slug, currency_code) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(&channel.name)
        .bind(&channel.slug)
        .bind(&channel.currency_code)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        summary.channels += usize::try_from(inserted).unwrap_or(0);
    }

    for warehouse in &catalog.warehouses {
        let inserted = sqlx::query(
            "INSERT INTO warehouse_warehouse (id, name, slug) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(&warehouse.name)
        .bind(&warehouse.slug)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        summary.warehouses += usize::try_from(inserted).unwrap_or(0);
    }

    let mut attribute_ids: HashMap<String, i64> = HashMap::new();
    let mut value_ids: ValueIds = HashMap::new();
    for attribute in &catalog.attributes {
        let attribute_id = upsert_attribute(&mut tx, attribute, &mut value_ids).await?;
        attribute_ids.insert(attribute.slug.clone(), attribute_id);
        summary.attributes += 1;
    }

    for product in &catalog.products {
        summary.variants += upsert_product(&mut tx, product, &attribute_ids, &value_ids).await?;
        summary.products += 1;
    }

    tx.commit().await?;
    tracing::debug!(?summary, "demo catalog committed");
    Ok(summary)
}

async fn upsert_attribute(
    tx: &mut Transaction<'_, Postgres>,
    attribute: &AttributeConfig,
    value_ids: &mut ValueIds,
) -> Result<i64, DbError> {
    let attribute_id: i64 = sqlx::query_scalar(
        "INSERT INTO attribute_attribute (name, slug) \
         VALUES ($1, $2) \
         ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name \
         RETURNING id",
    )
    .bind(&attribute.name)
    .bind(&attribute.slug)
    .fetch_one(&mut **tx)
    .await?;

    for (position, value) in attribute.values.iter().enumerate() {
        let value_id: i64 = sqlx::query_scalar(
            "INSERT INTO attribute_attributevalue (attribute_id, name, slug, sort_order) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (attribute_id, slug) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id",
        )
        .bind(attribute_id)
        .bind(value)
        .bind(value_slug(value))
        .bind(sort_order(position))
        .fetch_one(&mut **tx)
        .await?;
        value_ids.insert((attribute.slug.clone(), value.clone()), value_id);
    }

    Ok(attribute_id)
}

/// Upserts one product with its variants. Returns the number of variants.
async fn upsert_product(
    tx: &mut Transaction<'_, Postgres>,
    product: &ProductConfig,
    attribute_ids: &HashMap<String, i64>,
    value_ids: &ValueIds,
) -> Result<usize, DbError> {
    let product_id: i64 = sqlx::query_scalar(
        "INSERT INTO product_product (name, slug) \
         VALUES ($1, $2) \
         ON CONFLICT (slug) DO UPDATE SET updated_at = NOW() \
         RETURNING id",
    )
    .bind(&product.name)
    .bind(&product.slug)
    .fetch_one(&mut **tx)
    .await?;

    for (position, variant) in product.variants.iter().enumerate() {
        let variant_id: i64 = sqlx::query_scalar(
            "INSERT INTO product_productvariant (product_id, name, sku, sort_order) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (sku) DO UPDATE SET updated_at = NOW() \
             RETURNING id",
        )
        .bind(product_id)
        .bind(&variant.name)
        .bind(&variant.sku)
        .bind(sort_order(position))
        .fetch_one(&mut **tx)
        .await?;

        for pick in &variant.attributes {
            // The catalog was validated on load, so a miss means a caller
            // built the catalog by hand.
            let (Some(&attribute_id), Some(&value_id)) = (
                attribute_ids.get(&pick.attribute),
                value_ids.get(&(pick.attribute.clone(), pick.value.clone())),
            ) else {
                tracing::warn!(
                    sku = %variant.sku,
                    attribute = %pick.attribute,
                    value = %pick.value,
                    "skipping unknown attribute value"
                );
                continue;
            };

            let assignment_id: i64 = sqlx::query_scalar(
                "INSERT INTO attribute_assignedvariantattribute (variant_id, attribute_id) \
                 VALUES ($1, $2) \
                 ON CONFLICT (variant_id, attribute_id) DO UPDATE \
                 SET attribute_id = EXCLUDED.attribute_id \
                 RETURNING id",
            )
            .bind(variant_id)
            .bind(attribute_id)
            .fetch_one(&mut **tx)
            .await?;

            sqlx::query(
                "INSERT INTO attribute_assignedvariantattributevalue \
                     (assignment_id, value_id, sort_order) \
                 VALUES ($1, $2, 0) \
                 ON CONFLICT (assignment_id, value_id) DO NOTHING",
            )
            .bind(assignment_id)
            .bind(value_id)
            .execute(&mut **tx)
            .await?;
        }
    }

    Ok(product.variants.len())
}

fn sort_order(position: usize) -> i32 {
    i32::try_from(position).unwrap_or(i32::MAX)
}

/// Lowercase slug for an attribute value name. Letters and digits are kept,
/// every other run of characters becomes a single `-`.
fn value_slug(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
