use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    accounts, catalog, discounts, inventory, AccountWrite, ChannelRow, DbError, NewVoucher,
    NewVoucherListing, StoreRepository, UserRow, VariantRow, VoucherCodeRow, WarehouseRow,
};

/// [`StoreRepository`] backed by a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreRepository for PgStore {
    async fn count_products(&self) -> Result<i64, DbError> {
        catalog::count_products(&self.pool).await
    }

    async fn list_variants(&self) -> Result<Vec<VariantRow>, DbError> {
        catalog::list_variants(&self.pool).await
    }

    async fn variant_value_names(&self, variant_id: i64) -> Result<Vec<String>, DbError> {
        catalog::list_variant_value_names(&self.pool, variant_id).await
    }

    async fn product_variant_ids(&self, product_id: i64) -> Result<Vec<i64>, DbError> {
        catalog::list_product_variant_ids(&self.pool, product_id).await
    }

    async fn rename_variant(&self, variant_id: i64, name: &str) -> Result<(), DbError> {
        catalog::rename_variant(&self.pool, variant_id, name).await
    }

    async fn first_warehouse(&self) -> Result<Option<WarehouseRow>, DbError> {
        inventory::first_warehouse(&self.pool).await
    }

    async fn upsert_stock(
        &self,
        warehouse_id: Uuid,
        variant_id: i64,
        quantity: i32,
    ) -> Result<bool, DbError> {
        inventory::upsert_stock(&self.pool, warehouse_id, variant_id, quantity).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, DbError> {
        accounts::find_user_by_email(&self.pool, email).await
    }

    async fn insert_user(&self, account: &AccountWrite<'_>) -> Result<i64, DbError> {
        accounts::insert_user(&self.pool, account).await
    }

    async fn update_user(&self, user_id: i64, account: &AccountWrite<'_>) -> Result<(), DbError> {
        accounts::update_user(&self.pool, user_id, account).await
    }

    async fn find_channel_by_slug(&self, slug: &str) -> Result<Option<ChannelRow>, DbError> {
        discounts::find_channel_by_slug(&self.pool, slug).await
    }

    async fn first_channel(&self) -> Result<Option<ChannelRow>, DbError> {
        discounts::first_channel(&self.pool).await
    }

    async fn find_voucher_code(&self, code: &str) -> Result<Option<VoucherCodeRow>, DbError> {
        discounts::find_voucher_code(&self.pool, code).await
    }

    async fn insert_voucher_with_code(&self, voucher: &NewVoucher<'_>) -> Result<i64, DbError> {
        discounts::insert_voucher_with_code(&self.pool, voucher).await
    }

    async fn has_voucher_listing(
        &self,
        voucher_id: i64,
        channel_id: i64,
    ) -> Result<bool, DbError> {
        discounts::has_voucher_listing(&self.pool, voucher_id, channel_id).await
    }

    async fn insert_voucher_listing(
        &self,
        listing: &NewVoucherListing<'_>,
    ) -> Result<(), DbError> {
        discounts::insert_voucher_listing(&self.pool, listing).await
    }
}
