//! Display-name rules for product variants.
//!
//! A variant is named after its assigned attribute values when it has any.
//! Otherwise a placeholder name (blank, an encoded ID such as
//! `UHJvZHVjdFZhcmlhbnQ6MQ==`, or anything too long to display) is replaced
//! with `Opção {n}`, where `n` is the variant's 1-based position in its product.

/// Prefix of base64-encoded `ProductVariant:<id>` identifiers left behind by
/// catalog generators.
pub const ENCODED_ID_PREFIX: &str = "UHJ";

/// Longest name, in characters, kept as-is for a variant without attributes.
pub const MAX_DISPLAY_CHARS: usize = 30;

pub const ATTRIBUTE_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePlan {
    /// Use this name, built from attribute values.
    FromAttributes(String),
    /// Replace the name with [`fallback_name`] for the variant's position.
    Positional,
    /// The current name stays.
    Keep,
}

/// Decide how a variant should be named.
///
/// `value_names` are the names of every value assigned to the variant, in the
/// order the store returned them. They are joined as given, never sorted.
#[must_use]
pub fn plan_variant_name<S: AsRef<str>>(current: &str, value_names: &[S]) -> NamePlan {
    if let Some(name) = attribute_name(value_names) {
        return NamePlan::FromAttributes(name);
    }

    if is_placeholder(current) {
        NamePlan::Positional
    } else {
        NamePlan::Keep
    }
}

/// Join value names with `" - "`. `None` when the result would be empty.
#[must_use]
pub fn attribute_name<S: AsRef<str>>(value_names: &[S]) -> Option<String> {
    let joined = value_names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(ATTRIBUTE_SEPARATOR);
    (!joined.is_empty()).then_some(joined)
}

/// Whether `name` is unfit for display and should get a positional name.
#[must_use]
pub fn is_placeholder(name: &str) -> bool {
    name.is_empty()
        || name.starts_with(ENCODED_ID_PREFIX)
        || name.chars().count() > MAX_DISPLAY_CHARS
}

/// Positional name for the variant at 1-based `position`.
#[must_use]
pub fn fallback_name(position: usize) -> String {
    format!("Opção {position}")
}
