use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub name: String,
    pub slug: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeConfig {
    pub name: String,
    pub slug: String,
    pub values: Vec<String>,
}

/// One attribute value picked by a variant, referenced by attribute slug and
/// value name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantAttributeConfig {
    pub attribute: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantConfig {
    pub sku: String,
    /// Initial display name. Catalog generators often leave encoded IDs here.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<VariantAttributeConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    pub name: String,
    pub slug: String,
    pub variants: Vec<VariantConfig>,
}

/// Demo catalog inserted into an empty store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoCatalog {
    #[serde(default)]
    pub channels: Vec<ChannelConfig>,
    #[serde(default)]
    pub warehouses: Vec<WarehouseConfig>,
    #[serde(default)]
    pub attributes: Vec<AttributeConfig>,
    pub products: Vec<ProductConfig>,
}

impl DemoCatalog {
    /// Total number of variants across all products.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.products.iter().map(|p| p.variants.len()).sum()
    }
}

/// Load and validate the demo catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_demo_catalog(path: &Path) -> Result<DemoCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_demo_catalog(&content)
}

/// Parse and validate a demo catalog from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text is not a valid catalog.
pub fn parse_demo_catalog(content: &str) -> Result<DemoCatalog, ConfigError> {
    let catalog: DemoCatalog = serde_yaml::from_str(content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &DemoCatalog) -> Result<(), ConfigError> {
    if catalog.products.is_empty() {
        return Err(ConfigError::Validation(
            "catalog must define at least one product".to_string(),
        ));
    }

    unique_slugs("channel", catalog.channels.iter().map(|c| c.slug.as_str()))?;
    unique_slugs("warehouse", catalog.warehouses.iter().map(|w| w.slug.as_str()))?;
    unique_slugs("attribute", catalog.attributes.iter().map(|a| a.slug.as_str()))?;
    unique_slugs("product", catalog.products.iter().map(|p| p.slug.as_str()))?;

    for channel in &catalog.channels {
        if channel.currency_code.len() != 3 {
            return Err(ConfigError::Validation(format!(
                "channel '{}' has invalid currency code '{}'",
                channel.slug, channel.currency_code
            )));
        }
    }

    let mut values_by_attribute: HashMap<&str, HashSet<&str>> = HashMap::new();
    for attribute in &catalog.attributes {
        let mut values = HashSet::new();
        for value in &attribute.values {
            if !values.insert(value.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "attribute '{}' lists value '{value}' more than once",
                    attribute.slug
                )));
            }
        }
        values_by_attribute.insert(attribute.slug.as_str(), values);
    }

    let mut seen_skus = HashSet::new();
    for product in &catalog.products {
        if product.variants.is_empty() {
            return Err(ConfigError::Validation(format!(
                "product '{}' has no variants",
                product.slug
            )));
        }

        for variant in &product.variants {
            if !seen_skus.insert(variant.sku.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate variant sku: '{}'",
                    variant.sku
                )));
            }

            for pick in &variant.attributes {
                let known = values_by_attribute
                    .get(pick.attribute.as_str())
                    .is_some_and(|values| values.contains(pick.value.as_str()));
                if !known {
                    return Err(ConfigError::Validation(format!(
                        "variant '{}' references unknown attribute value {}={}",
                        variant.sku, pick.attribute, pick.value
                    )));
                }
            }
        }
    }

    Ok(())
}

fn unique_slugs<'a>(
    kind: &str,
    slugs: impl Iterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if slug.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{kind} slug must be non-empty"
            )));
        }
        if !seen.insert(slug) {
            return Err(ConfigError::Validation(format!(
                "duplicate {kind} slug: '{slug}'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
