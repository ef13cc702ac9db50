use storeinit_core::STOCK_QUANTITY;
use storeinit_db::StoreRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StockOutcome {
    Stocked {
        warehouse: String,
        variants: usize,
        created: usize,
    },
    /// No warehouse exists; nothing was written.
    NoWarehouse,
}

/// Force every variant's stock at the first warehouse to [`STOCK_QUANTITY`].
pub(crate) async fn normalize_stock<S>(store: &S) -> anyhow::Result<StockOutcome>
where
    S: StoreRepository + ?Sized,
{
    let Some(warehouse) = store.first_warehouse().await? else {
        tracing::error!("no warehouse found; stock step skipped");
        eprintln!("error: no warehouse found; skipping stock update");
        return Ok(StockOutcome::NoWarehouse);
    };

    let variants = store.list_variants().await?;
    let mut created = 0usize;
    for variant in &variants {
        if store
            .upsert_stock(warehouse.id, variant.id, STOCK_QUANTITY)
            .await?
        {
            created += 1;
        }
    }

    tracing::info!(
        warehouse = %warehouse.slug,
        variants = variants.len(),
        created,
        "stock normalized"
    );
    println!(
        "stock set to {STOCK_QUANTITY} for {} variants at {}",
        variants.len(),
        warehouse.slug
    );

    Ok(StockOutcome::Stocked {
        warehouse: warehouse.slug,
        variants: variants.len(),
        created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::memory_store::MemoryStore;

    #[tokio::test]
    async fn missing_warehouse_skips_step() {
        let store = MemoryStore::default();
        let product = store.add_product("Caneca");
        store.add_variant(product, "Caneca", &[]);

        let outcome = normalize_stock(&store).await.unwrap();

        assert_eq!(outcome, StockOutcome::NoWarehouse);
        assert!(store.stock_rows().is_empty());
    }

    #[tokio::test]
    async fn every_variant_gets_one_row_at_first_warehouse() {
        let store = MemoryStore::default();
        let first = store.add_warehouse("a-warehouse");
        let other = store.add_warehouse("b-warehouse");
        let product = store.add_product("Camiseta");
        let v1 = store.add_variant(product, "P", &[]);
        let v2 = store.add_variant(product, "M", &[]);
        store.set_stock(other, v1, 3);
        store.set_stock(first, v2, 7);

        let outcome = normalize_stock(&store).await.unwrap();

        assert_eq!(
            outcome,
            StockOutcome::Stocked {
                warehouse: "a-warehouse".to_string(),
                variants: 2,
                created: 1,
            }
        );
        assert_eq!(store.stock(first, v1), Some(STOCK_QUANTITY));
        assert_eq!(store.stock(first, v2), Some(STOCK_QUANTITY));
        // Other warehouses are not touched.
        assert_eq!(store.stock(other, v1), Some(3));
    }

    #[tokio::test]
    async fn rerun_creates_nothing_new() {
        let store = MemoryStore::default();
        store.add_warehouse("cd");
        let product = store.add_product("Camiseta");
        store.add_variant(product, "P", &[]);

        normalize_stock(&store).await.unwrap();
        let rows_after_first = store.stock_rows();
        let second = normalize_stock(&store).await.unwrap();

        assert!(matches!(second, StockOutcome::Stocked { created: 0, .. }));
        assert_eq!(store.stock_rows(), rows_after_first);
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let store = MemoryStore::default();
        store.add_warehouse("cd");
        let product = store.add_product("Camiseta");
        store.add_variant(product, "P", &[]);
        store.fail_stock_writes();

        assert!(normalize_stock(&store).await.is_err());
    }
}
