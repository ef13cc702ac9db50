//! The initializer steps that run after migrations.
//!
//! Each step converges one slice of the store to its canonical state and
//! prints a status line. A missing warehouse or channel skips only the step
//! that needs it; any other error aborts the run.

pub(crate) mod accounts;
pub(crate) mod catalog;
pub(crate) mod stock;
pub(crate) mod summary;
pub(crate) mod variant_names;
pub(crate) mod vouchers;

#[cfg(test)]
pub(crate) mod memory_store;

use storeinit_db::StoreRepository;

use self::accounts::AccountOutcome;
use self::catalog::{CatalogOutcome, CatalogPopulator};
use self::stock::StockOutcome;
use self::variant_names::NamingOutcome;
use self::vouchers::VouchersOutcome;

/// What each step did during one run.
#[derive(Debug)]
pub(crate) struct InitReport {
    pub catalog: CatalogOutcome,
    pub stock: StockOutcome,
    pub names: NamingOutcome,
    pub accounts: Vec<AccountOutcome>,
    pub vouchers: VouchersOutcome,
}

/// Run every post-migration step in order against `store`.
///
/// # Errors
///
/// Returns the first store, populator, or hashing error. Earlier steps'
/// writes are kept.
pub(crate) async fn run_initializer<S, P>(
    store: &S,
    populator: &P,
    bcrypt_cost: u32,
) -> anyhow::Result<InitReport>
where
    S: StoreRepository + ?Sized,
    P: CatalogPopulator + ?Sized,
{
    println!("checking catalog...");
    let catalog = catalog::ensure_catalog(store, populator).await?;

    println!("setting stock levels...");
    let stock = stock::normalize_stock(store).await?;

    println!("normalizing variant names...");
    let names = variant_names::normalize_variant_names(store).await?;

    println!("provisioning test accounts...");
    let accounts = accounts::provision_accounts(store, bcrypt_cost).await?;

    println!("provisioning vouchers...");
    let vouchers = vouchers::provision_vouchers(store).await?;

    Ok(InitReport {
        catalog,
        stock,
        names,
        accounts,
        vouchers,
    })
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
