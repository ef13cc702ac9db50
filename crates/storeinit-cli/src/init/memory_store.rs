//! In-memory [`StoreRepository`] for exercising the initializer steps
//! without a database.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use storeinit_db::{
    AccountWrite, ChannelRow, DbError, NewVoucher, NewVoucherListing, StoreRepository, UserRow,
    VariantRow, VoucherCodeRow, VoucherListingRow, WarehouseRow,
};
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    products: Vec<(i64, String)>,
    variants: Vec<VariantRow>,
    /// Attribute value names per variant, in assignment order.
    variant_values: Vec<(i64, Vec<String>)>,
    renames: usize,
    warehouses: Vec<WarehouseRow>,
    stock: Vec<(Uuid, i64, i32)>,
    fail_stock_writes: bool,
    users: Vec<UserRow>,
    channels: Vec<ChannelRow>,
    vouchers: Vec<(i64, String)>,
    codes: Vec<VoucherCodeRow>,
    listings: Vec<VoucherListingRow>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared handle; clones see the same state.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    state: Arc<Mutex<State>>,
}

fn write_failure(what: &str) -> DbError {
    DbError::Sqlx(sqlx::Error::Protocol(format!("simulated failure: {what}")))
}

impl MemoryStore {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    // catalog

    pub(crate) fn add_product(&self, name: &str) -> i64 {
        let mut state = self.state();
        let id = state.next_id();
        state.products.push((id, name.to_string()));
        id
    }

    pub(crate) fn add_variant(&self, product_id: i64, name: &str, values: &[&str]) -> i64 {
        let mut state = self.state();
        let id = state.next_id();
        state.variants.push(VariantRow {
            id,
            product_id,
            name: name.to_string(),
            sku: Some(format!("SKU-{id}")),
        });
        state
            .variant_values
            .push((id, values.iter().map(ToString::to_string).collect()));
        id
    }

    pub(crate) fn variant_name(&self, variant_id: i64) -> Option<String> {
        self.state()
            .variants
            .iter()
            .find(|v| v.id == variant_id)
            .map(|v| v.name.clone())
    }

    /// `(id, name)` of every variant.
    pub(crate) fn variant_names(&self) -> Vec<(i64, String)> {
        self.state()
            .variants
            .iter()
            .map(|v| (v.id, v.name.clone()))
            .collect()
    }

    pub(crate) fn rename_count(&self) -> usize {
        self.state().renames
    }

    // inventory

    pub(crate) fn add_warehouse(&self, slug: &str) -> Uuid {
        let mut state = self.state();
        let id = Uuid::from_u128(u128::from(state.next_id().unsigned_abs()));
        state.warehouses.push(WarehouseRow {
            id,
            name: slug.to_string(),
            slug: slug.to_string(),
        });
        id
    }

    pub(crate) fn set_stock(&self, warehouse_id: Uuid, variant_id: i64, quantity: i32) {
        self.state().stock.push((warehouse_id, variant_id, quantity));
    }

    pub(crate) fn stock(&self, warehouse_id: Uuid, variant_id: i64) -> Option<i32> {
        self.state()
            .stock
            .iter()
            .find(|(w, v, _)| *w == warehouse_id && *v == variant_id)
            .map(|(_, _, q)| *q)
    }

    pub(crate) fn stock_rows(&self) -> Vec<(Uuid, i64, i32)> {
        self.state().stock.clone()
    }

    pub(crate) fn fail_stock_writes(&self) {
        self.state().fail_stock_writes = true;
    }

    // accounts

    #[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
    pub(crate) fn add_user(
        &self,
        email: &str,
        password: &str,
        is_active: bool,
        is_staff: bool,
        is_superuser: bool,
        first_name: &str,
        last_name: &str,
    ) -> i64 {
        let mut state = self.state();
        let id = state.next_id();
        let now = Utc::now();
        state.users.push(UserRow {
            id,
            email: email.to_string(),
            password: password.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            is_active,
            is_staff,
            is_superuser,
            date_joined: now,
            updated_at: now,
        });
        id
    }

    pub(crate) fn user(&self, email: &str) -> Option<UserRow> {
        self.state().users.iter().find(|u| u.email == email).cloned()
    }

    pub(crate) fn user_count(&self) -> usize {
        self.state().users.len()
    }

    // discounts

    pub(crate) fn add_channel(&self, slug: &str, currency_code: &str) -> i64 {
        let mut state = self.state();
        let id = state.next_id();
        state.channels.push(ChannelRow {
            id,
            name: slug.to_string(),
            slug: slug.to_string(),
            currency_code: currency_code.to_string(),
        });
        id
    }

    /// Creates a voucher with `code`, optionally listed on a channel.
    pub(crate) fn add_voucher_code(&self, code: &str, listing: Option<(i64, Decimal)>) -> i64 {
        let mut state = self.state();
        let voucher_id = state.next_id();
        state.vouchers.push((voucher_id, code.to_string()));
        let code_id = state.next_id();
        state.codes.push(VoucherCodeRow {
            id: code_id,
            code: code.to_string(),
            voucher_id,
            is_active: true,
        });
        if let Some((channel_id, discount_value)) = listing {
            let listing_id = state.next_id();
            state.listings.push(VoucherListingRow {
                id: listing_id,
                voucher_id,
                channel_id,
                discount_value,
                min_spent_amount: None,
                currency: "BRL".to_string(),
            });
        }
        voucher_id
    }

    pub(crate) fn voucher_count(&self) -> usize {
        self.state().vouchers.len()
    }

    pub(crate) fn listings_for_code(&self, code: &str) -> Vec<VoucherListingRow> {
        let state = self.state();
        let Some(voucher_id) = state
            .codes
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.voucher_id)
        else {
            return Vec::new();
        };
        state
            .listings
            .iter()
            .filter(|l| l.voucher_id == voucher_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl StoreRepository for MemoryStore {
    async fn count_products(&self) -> Result<i64, DbError> {
        Ok(i64::try_from(self.state().products.len()).unwrap())
    }

    async fn list_variants(&self) -> Result<Vec<VariantRow>, DbError> {
        Ok(self.state().variants.clone())
    }

    async fn variant_value_names(&self, variant_id: i64) -> Result<Vec<String>, DbError> {
        Ok(self
            .state()
            .variant_values
            .iter()
            .find(|(id, _)| *id == variant_id)
            .map(|(_, values)| values.clone())
            .unwrap_or_default())
    }

    async fn product_variant_ids(&self, product_id: i64) -> Result<Vec<i64>, DbError> {
        Ok(self
            .state()
            .variants
            .iter()
            .filter(|v| v.product_id == product_id)
            .map(|v| v.id)
            .collect())
    }

    async fn rename_variant(&self, variant_id: i64, name: &str) -> Result<(), DbError> {
        let mut state = self.state();
        let variant = state
            .variants
            .iter_mut()
            .find(|v| v.id == variant_id)
            .ok_or(DbError::NotFound)?;
        variant.name = name.to_string();
        state.renames += 1;
        Ok(())
    }

    async fn first_warehouse(&self) -> Result<Option<WarehouseRow>, DbError> {
        Ok(self
            .state()
            .warehouses
            .iter()
            .min_by(|a, b| a.slug.cmp(&b.slug).then(a.id.cmp(&b.id)))
            .cloned())
    }

    async fn upsert_stock(
        &self,
        warehouse_id: Uuid,
        variant_id: i64,
        quantity: i32,
    ) -> Result<bool, DbError> {
        let mut state = self.state();
        if state.fail_stock_writes {
            return Err(write_failure("stock write"));
        }
        if let Some(row) = state
            .stock
            .iter_mut()
            .find(|(w, v, _)| *w == warehouse_id && *v == variant_id)
        {
            row.2 = quantity;
            return Ok(false);
        }
        state.stock.push((warehouse_id, variant_id, quantity));
        Ok(true)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, DbError> {
        Ok(self.user(email))
    }

    async fn insert_user(&self, account: &AccountWrite<'_>) -> Result<i64, DbError> {
        if self.user(account.email).is_some() {
            return Err(write_failure("duplicate email"));
        }
        Ok(self.add_user(
            account.email,
            account.password_hash,
            account.is_active,
            account.is_staff,
            account.is_superuser,
            account.first_name.unwrap_or_default(),
            account.last_name.unwrap_or_default(),
        ))
    }

    async fn update_user(&self, user_id: i64, account: &AccountWrite<'_>) -> Result<(), DbError> {
        let mut state = self.state();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(DbError::NotFound)?;
        user.email = account.email.to_string();
        user.password = account.password_hash.to_string();
        user.is_active = account.is_active;
        user.is_staff = account.is_staff;
        user.is_superuser = account.is_superuser;
        if let Some(first_name) = account.first_name {
            user.first_name = first_name.to_string();
        }
        if let Some(last_name) = account.last_name {
            user.last_name = last_name.to_string();
        }
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn find_channel_by_slug(&self, slug: &str) -> Result<Option<ChannelRow>, DbError> {
        Ok(self
            .state()
            .channels
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn first_channel(&self) -> Result<Option<ChannelRow>, DbError> {
        Ok(self
            .state()
            .channels
            .iter()
            .min_by(|a, b| a.slug.cmp(&b.slug).then(a.id.cmp(&b.id)))
            .cloned())
    }

    async fn find_voucher_code(&self, code: &str) -> Result<Option<VoucherCodeRow>, DbError> {
        Ok(self
            .state()
            .codes
            .iter()
            .find(|c| c.code == code)
            .cloned())
    }

    async fn insert_voucher_with_code(&self, voucher: &NewVoucher<'_>) -> Result<i64, DbError> {
        if self.state().codes.iter().any(|c| c.code == voucher.code) {
            return Err(write_failure("duplicate voucher code"));
        }
        Ok(self.add_voucher_code(voucher.code, None))
    }

    async fn has_voucher_listing(
        &self,
        voucher_id: i64,
        channel_id: i64,
    ) -> Result<bool, DbError> {
        Ok(self
            .state()
            .listings
            .iter()
            .any(|l| l.voucher_id == voucher_id && l.channel_id == channel_id))
    }

    async fn insert_voucher_listing(
        &self,
        listing: &NewVoucherListing<'_>,
    ) -> Result<(), DbError> {
        let mut state = self.state();
        if state
            .listings
            .iter()
            .any(|l| l.voucher_id == listing.voucher_id && l.channel_id == listing.channel_id)
        {
            return Err(write_failure("duplicate voucher listing"));
        }
        let id = state.next_id();
        state.listings.push(VoucherListingRow {
            id,
            voucher_id: listing.voucher_id,
            channel_id: listing.channel_id,
            discount_value: listing.discount_value,
            min_spent_amount: listing.min_spent_amount,
            currency: listing.currency.to_string(),
        });
        Ok(())
    }
}
