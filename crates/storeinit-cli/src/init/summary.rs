use storeinit_core::STOCK_QUANTITY;

use super::catalog::CatalogOutcome;
use super::stock::StockOutcome;
use super::vouchers::VouchersOutcome;
use super::InitReport;

const RULE: &str = "==================================================";

pub(crate) fn print_banner() {
    println!("{RULE}");
    println!("storeinit {}", env!("CARGO_PKG_VERSION"));
    println!("{RULE}");
}

pub(crate) fn print_summary(report: &InitReport) {
    print!("{}", render_summary(report));
}

/// Human-readable recap of a run: what each step did, plus the credentials
/// and codes a developer needs next.
pub(crate) fn render_summary(report: &InitReport) -> String {
    let mut lines = vec![
        RULE.to_string(),
        "store initialized".to_string(),
        RULE.to_string(),
    ];

    lines.push(match &report.catalog {
        CatalogOutcome::AlreadyPopulated { products } => {
            format!("catalog:  {products} products (existing)")
        }
        CatalogOutcome::Populated { source, products } => {
            format!("catalog:  {products} products (populated from {source})")
        }
    });

    lines.push(match &report.stock {
        StockOutcome::Stocked {
            warehouse,
            variants,
            created,
        } => format!(
            "stock:    {STOCK_QUANTITY} units for {variants} variants at {warehouse} ({created} new rows)"
        ),
        StockOutcome::NoWarehouse => "stock:    skipped (no warehouse)".to_string(),
    });

    let names = &report.names;
    lines.push(format!(
        "variants: {} renamed ({} from attributes, {} positional)",
        names.renamed, names.from_attributes, names.positional
    ));

    lines.push(String::new());
    lines.push("test accounts:".to_string());
    lines.extend(report.accounts.iter().map(|outcome| {
        let account = &outcome.account;
        format!(
            "  {:<8} {} / {} ({})",
            account.role.to_string(),
            account.email,
            account.password,
            outcome.action
        )
    }));

    lines.push(String::new());
    match &report.vouchers {
        VouchersOutcome::Provisioned { channel, vouchers } => {
            lines.push(format!("vouchers on {channel}:"));
            lines.extend(
                vouchers
                    .iter()
                    .map(|(definition, action)| format!("  {} ({action})", definition.describe())),
            );
        }
        VouchersOutcome::NoChannel => lines.push("vouchers: skipped (no channel)".to_string()),
    }
    lines.push(RULE.to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
