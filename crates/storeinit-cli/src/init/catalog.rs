//! Demo catalog population for empty stores.

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use storeinit_db::StoreRepository;

/// Fills an empty store with a demo catalog.
#[async_trait]
pub(crate) trait CatalogPopulator: Send + Sync {
    /// Short label for status output.
    fn describe(&self) -> String;

    async fn populate(&self) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CatalogOutcome {
    AlreadyPopulated { products: i64 },
    Populated { source: String, products: i64 },
}

/// Invoke `populator` once if the store has no products, never otherwise.
pub(crate) async fn ensure_catalog<S, P>(store: &S, populator: &P) -> anyhow::Result<CatalogOutcome>
where
    S: StoreRepository + ?Sized,
    P: CatalogPopulator + ?Sized,
{
    let existing = store.count_products().await?;
    if existing > 0 {
        tracing::info!(products = existing, "catalog already populated");
        println!("catalog already has {existing} products; skipping demo data");
        return Ok(CatalogOutcome::AlreadyPopulated { products: existing });
    }

    let source = populator.describe();
    println!("catalog is empty; populating from {source}...");
    populator
        .populate()
        .await
        .with_context(|| format!("demo catalog population from {source} failed"))?;

    let products = store.count_products().await?;
    tracing::info!(products, %source, "demo catalog populated");
    println!("catalog populated with {products} products");
    Ok(CatalogOutcome::Populated { source, products })
}

/// Pick the external command when one is configured, the bundled YAML
/// catalog otherwise.
pub(crate) fn populator_from_config(
    config: &storeinit_core::AppConfig,
    pool: sqlx::PgPool,
) -> anyhow::Result<Box<dyn CatalogPopulator>> {
    if let Some(command_line) = config.populate_command.as_deref() {
        let command = ExternalCommand::parse(command_line)
            .context("STOREINIT_POPULATE_COMMAND is set but contains no program")?;
        return Ok(Box::new(command));
    }

    Ok(Box::new(BuiltinCatalog {
        pool,
        path: config.demo_catalog_path.clone(),
    }))
}

/// Seeds the YAML demo catalog. The file is read only when population is
/// actually needed.
pub(crate) struct BuiltinCatalog {
    pool: sqlx::PgPool,
    path: PathBuf,
}

#[async_trait]
impl CatalogPopulator for BuiltinCatalog {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn populate(&self) -> anyhow::Result<()> {
        let catalog = storeinit_core::load_demo_catalog(&self.path)?;
        let summary = storeinit_db::seed_demo_catalog(&self.pool, &catalog).await?;
        println!(
            "seeded {} channels, {} warehouses, {} attributes, {} products, {} variants",
            summary.channels,
            summary.warehouses,
            summary.attributes,
            summary.products,
            summary.variants
        );
        Ok(())
    }
}

/// Runs an external populator, e.g. the web application's own demo-data
/// management command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    /// Split a command line on whitespace. `None` when it is blank.
    pub(crate) fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

#[async_trait]
impl CatalogPopulator for ExternalCommand {
    fn describe(&self) -> String {
        if self.args.is_empty() {
            format!("`{}`", self.program)
        } else {
            format!("`{} {}`", self.program, self.args.join(" "))
        }
    }

    async fn populate(&self) -> anyhow::Result<()> {
        tracing::info!(program = %self.program, args = ?self.args, "spawning populator");
        let status = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .status()
            .await
            .with_context(|| format!("failed to spawn {}", self.program))?;

        if !status.success() {
            anyhow::bail!("{} exited with {status}", self.describe());
        }
        Ok(())
    }
}
