use storeinit_core::variant_names::fallback_name;
use storeinit_core::{plan_variant_name, NamePlan};
use storeinit_db::{StoreRepository, VariantRow};

/// Counts from one pass of [`normalize_variant_names`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct NamingOutcome {
    /// Variants whose target name came from attribute values.
    pub from_attributes: usize,
    /// Variants whose placeholder name was replaced positionally.
    pub positional: usize,
    /// Variants left with their current name.
    pub kept: usize,
    /// Rows actually written (target differed from the stored name).
    pub renamed: usize,
}

/// Rename every variant after its attribute values, or give placeholder
/// names an `Opção {n}` label.
pub(crate) async fn normalize_variant_names<S>(store: &S) -> anyhow::Result<NamingOutcome>
where
    S: StoreRepository + ?Sized,
{
    let variants = store.list_variants().await?;
    let mut outcome = NamingOutcome::default();

    for variant in &variants {
        let values = store.variant_value_names(variant.id).await?;
        let target = match plan_variant_name(&variant.name, &values) {
            NamePlan::FromAttributes(name) => {
                outcome.from_attributes += 1;
                name
            }
            NamePlan::Positional => {
                outcome.positional += 1;
                fallback_name(variant_position(store, variant).await?)
            }
            NamePlan::Keep => {
                outcome.kept += 1;
                continue;
            }
        };

        if target != variant.name {
            tracing::debug!(variant_id = variant.id, from = %variant.name, to = %target, "renaming variant");
            store.rename_variant(variant.id, &target).await?;
            outcome.renamed += 1;
        }
    }

    tracing::info!(?outcome, "variant names normalized");
    println!(
        "variant names: {} from attributes, {} positional, {} kept ({} rewritten)",
        outcome.from_attributes, outcome.positional, outcome.kept, outcome.renamed
    );
    Ok(outcome)
}

/// 1-based position of `variant` among its product's variants.
async fn variant_position<S>(store: &S, variant: &VariantRow) -> anyhow::Result<usize>
where
    S: StoreRepository + ?Sized,
{
    let siblings = store.product_variant_ids(variant.product_id).await?;
    let index = siblings
        .iter()
        .position(|id| *id == variant.id)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "variant {} is missing from product {}'s variant list",
                variant.id,
                variant.product_id
            )
        })?;
    Ok(index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::memory_store::MemoryStore;

    #[tokio::test]
    async fn attribute_values_become_the_name() {
        let store = MemoryStore::default();
        let product = store.add_product("Camiseta");
        let variant = store.add_variant(product, "UHJvZHVjdFZhcmlhbnQ6MQ==", &["M", "Preto"]);

        let outcome = normalize_variant_names(&store).await.unwrap();

        assert_eq!(store.variant_name(variant).as_deref(), Some("M - Preto"));
        assert_eq!(outcome.from_attributes, 1);
        assert_eq!(outcome.renamed, 1);
    }

    #[tokio::test]
    async fn placeholders_get_positional_names() {
        let store = MemoryStore::default();
        let product = store.add_product("Caneca");
        let first = store.add_variant(product, "", &[]);
        let second = store.add_variant(product, "Caneca Grande", &[]);
        let third = store.add_variant(product, "UHJvZHVjdFZhcmlhbnQ6Mw==", &[]);
        let long = store.add_variant(product, &"x".repeat(31), &[]);

        let outcome = normalize_variant_names(&store).await.unwrap();

        assert_eq!(store.variant_name(first).as_deref(), Some("Opção 1"));
        assert_eq!(store.variant_name(second).as_deref(), Some("Caneca Grande"));
        assert_eq!(store.variant_name(third).as_deref(), Some("Opção 3"));
        assert_eq!(store.variant_name(long).as_deref(), Some("Opção 4"));
        assert_eq!(outcome.positional, 3);
        assert_eq!(outcome.kept, 1);
    }

    #[tokio::test]
    async fn position_is_within_the_variants_own_product() {
        let store = MemoryStore::default();
        let shirts = store.add_product("Camiseta");
        let mugs = store.add_product("Caneca");
        store.add_variant(shirts, "P", &[]);
        store.add_variant(mugs, "Grande", &[]);
        store.add_variant(shirts, "M", &[]);
        let mug_placeholder = store.add_variant(mugs, "", &[]);

        normalize_variant_names(&store).await.unwrap();

        assert_eq!(store.variant_name(mug_placeholder).as_deref(), Some("Opção 2"));
    }

    #[tokio::test]
    async fn correct_names_are_not_rewritten() {
        let store = MemoryStore::default();
        let product = store.add_product("Suco");
        store.add_variant(product, "500ml", &["500ml"]);
        store.add_variant(product, "Opção 2", &[]);

        let outcome = normalize_variant_names(&store).await.unwrap();

        assert_eq!(outcome.renamed, 0);
        assert_eq!(store.rename_count(), 0);
    }

    #[tokio::test]
    async fn second_pass_is_a_no_op() {
        let store = MemoryStore::default();
        let product = store.add_product("Camiseta");
        store.add_variant(product, "", &[]);
        store.add_variant(product, "UHJ", &["G", "Branco"]);

        normalize_variant_names(&store).await.unwrap();
        let names_after_first = store.variant_names();
        let second = normalize_variant_names(&store).await.unwrap();

        assert_eq!(second.renamed, 0);
        assert_eq!(store.variant_names(), names_after_first);
    }
}
