//! The narrow persistence interface the initializer steps run against.
//!
//! One method per read, create, or update the steps need. [`crate::PgStore`]
//! implements it over Postgres; tests use an in-memory implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    AccountWrite, ChannelRow, DbError, NewVoucher, NewVoucherListing, UserRow, VariantRow,
    VoucherCodeRow, WarehouseRow,
};

#[async_trait]
pub trait StoreRepository: Send + Sync {
    // catalog
    async fn count_products(&self) -> Result<i64, DbError>;
    async fn list_variants(&self) -> Result<Vec<VariantRow>, DbError>;
    async fn variant_value_names(&self, variant_id: i64) -> Result<Vec<String>, DbError>;
    async fn product_variant_ids(&self, product_id: i64) -> Result<Vec<i64>, DbError>;
    async fn rename_variant(&self, variant_id: i64, name: &str) -> Result<(), DbError>;

    // inventory
    async fn first_warehouse(&self) -> Result<Option<WarehouseRow>, DbError>;
    /// Returns `true` when a new stock row was created.
    async fn upsert_stock(
        &self,
        warehouse_id: Uuid,
        variant_id: i64,
        quantity: i32,
    ) -> Result<bool, DbError>;

    // accounts
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, DbError>;
    async fn insert_user(&self, account: &AccountWrite<'_>) -> Result<i64, DbError>;
    async fn update_user(&self, user_id: i64, account: &AccountWrite<'_>) -> Result<(), DbError>;

    // discounts
    async fn find_channel_by_slug(&self, slug: &str) -> Result<Option<ChannelRow>, DbError>;
    async fn first_channel(&self) -> Result<Option<ChannelRow>, DbError>;
    async fn find_voucher_code(&self, code: &str) -> Result<Option<VoucherCodeRow>, DbError>;
    async fn insert_voucher_with_code(&self, voucher: &NewVoucher<'_>) -> Result<i64, DbError>;
    async fn has_voucher_listing(&self, voucher_id: i64, channel_id: i64)
        -> Result<bool, DbError>;
    async fn insert_voucher_listing(&self, listing: &NewVoucherListing<'_>)
        -> Result<(), DbError>;
}
