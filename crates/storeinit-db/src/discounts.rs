//! Database operations for `channel_channel`, `discount_voucher`,
//! `discount_vouchercode`, and `discount_voucherchannellisting`.

use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `channel_channel` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ChannelRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub currency_code: String,
}

/// A row from the `discount_vouchercode` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VoucherCodeRow {
    pub id: i64,
    pub code: String,
    pub voucher_id: i64,
    pub is_active: bool,
}

/// A row from the `discount_voucherchannellisting` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VoucherListingRow {
    pub id: i64,
    pub voucher_id: i64,
    pub channel_id: i64,
    pub discount_value: Decimal,
    pub min_spent_amount: Option<Decimal>,
    pub currency: String,
}

/// A voucher together with its single redeemable code.
#[derive(Debug, Clone, Copy)]
pub struct NewVoucher<'a> {
    pub name: &'a str,
    /// Scope of the discount, e.g. `entire_order`.
    pub voucher_type: &'a str,
    /// `percentage` or `fixed`.
    pub discount_value_type: &'a str,
    pub code: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct NewVoucherListing<'a> {
    pub voucher_id: i64,
    pub channel_id: i64,
    pub discount_value: Decimal,
    pub min_spent_amount: Option<Decimal>,
    pub currency: &'a str,
}

// ---------------------------------------------------------------------------
// channel_channel operations
// ---------------------------------------------------------------------------

/// Looks up a channel by slug.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_channel_by_slug(pool: &PgPool, slug: &str) -> Result<Option<ChannelRow>, DbError> {
    let row = sqlx::query_as::<_, ChannelRow>(
        "SELECT id, name, slug, currency_code \
         FROM channel_channel \
         WHERE slug = $1",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Returns the first channel ordered by `slug`, then `id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn first_channel(pool: &PgPool) -> Result<Option<ChannelRow>, DbError> {
    let row = sqlx::query_as::<_, ChannelRow>(
        "SELECT id, name, slug, currency_code \
         FROM channel_channel \
         ORDER BY slug, id \
         LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

// ---------------------------------------------------------------------------
// discount_voucher / discount_vouchercode operations
// ---------------------------------------------------------------------------

/// Looks up a voucher code.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_voucher_code(pool: &PgPool, code: &str) -> Result<Option<VoucherCodeRow>, DbError> {
    let row = sqlx::query_as::<_, VoucherCodeRow>(
        "SELECT id, code, voucher_id, is_active \
         FROM discount_vouchercode \
         WHERE code = $1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Creates a voucher and its active code in one transaction.
///
/// Returns the new voucher's `id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either insert fails, including when the code
/// already exists. Nothing is persisted in that case.
pub async fn insert_voucher_with_code(
    pool: &PgPool,
    voucher: &NewVoucher<'_>,
) -> Result<i64, DbError> {
    let mut tx = pool.begin().await?;

    let voucher_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO discount_voucher (name, type, discount_value_type, metadata) \
         VALUES ($1, $2, $3, $4::jsonb) \
         RETURNING id",
    )
    .bind(voucher.name)
    .bind(voucher.voucher_type)
    .bind(voucher.discount_value_type)
    .bind(json!({}))
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO discount_vouchercode (code, voucher_id, is_active) \
         VALUES ($1, $2, true)",
    )
    .bind(voucher.code)
    .bind(voucher_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(voucher_id)
}

// ---------------------------------------------------------------------------
// discount_voucherchannellisting operations
// ---------------------------------------------------------------------------

/// Whether a voucher already has a listing on a channel.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn has_voucher_listing(
    pool: &PgPool,
    voucher_id: i64,
    channel_id: i64,
) -> Result<bool, DbError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS ( \
             SELECT 1 FROM discount_voucherchannellisting \
             WHERE voucher_id = $1 AND channel_id = $2 \
         )",
    )
    .bind(voucher_id)
    .bind(channel_id)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Inserts a channel listing for a voucher.
///
/// The value of an existing listing is never changed: callers check
/// [`has_voucher_listing`] first, and a duplicate insert fails on the
/// `(voucher_id, channel_id)` unique constraint.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_voucher_listing(
    pool: &PgPool,
    listing: &NewVoucherListing<'_>,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO discount_voucherchannellisting \
             (voucher_id, channel_id, discount_value, min_spent_amount, currency) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(listing.voucher_id)
    .bind(listing.channel_id)
    .bind(listing.discount_value)
    .bind(listing.min_spent_amount)
    .bind(listing.currency)
    .execute(pool)
    .await?;
    Ok(())
}

/// Lists a voucher's channel listings ordered by `id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_voucher_listings(
    pool: &PgPool,
    voucher_id: i64,
) -> Result<Vec<VoucherListingRow>, DbError> {
    let rows = sqlx::query_as::<_, VoucherListingRow>(
        "SELECT id, voucher_id, channel_id, discount_value, min_spent_amount, currency \
         FROM discount_voucherchannellisting \
         WHERE voucher_id = $1 \
         ORDER BY id",
    )
    .bind(voucher_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
