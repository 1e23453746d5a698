//! # Discount Labels
//!
//! Generates the human-readable candidate messages. Each discount falls in
//! exactly one label category; the category prefix is what support staff
//! grep for in order history, so the spellings here are load-bearing.
//!
//! The random suffix on bundle labels is cosmetic only: it never feeds back
//! into matching or value computation, and it is the single source of
//! non-determinism in the whole evaluator.

use uuid::Uuid;

use crate::config::DiscountKind;
use crate::settings::Settings;

/// The six mutually exclusive discount label categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelCategory {
    /// Tier active, pre-sale mode on.
    PreSaleTier,
    /// Tier active, pre-sale mode off.
    NormalTier,
    /// No tier, pre-sale mode on.
    PreSaleDiscount,
    /// No tier, pre-sale mode off.
    NormalDiscount,
    /// Bundle member, pre-sale path.
    PreSaleBundle,
    /// Bundle member, normal path.
    NormalBundle,
}

impl LabelCategory {
    /// The bracketed prefix every generated label starts with.
    pub const fn prefix(self) -> &'static str {
        match self {
            LabelCategory::PreSaleTier => "[DC - PT]",
            LabelCategory::NormalTier => "[DC - NT]",
            LabelCategory::PreSaleDiscount => "[DC - PD]",
            LabelCategory::NormalDiscount => "[DC - ND]",
            LabelCategory::PreSaleBundle => "[DC - PB]",
            LabelCategory::NormalBundle => "[DC - NB]",
        }
    }
}

/// Formats a discount magnitude the way the storefront copy expects:
/// integral values lose the trailing `.0` (`15`, not `15.0`).
pub fn format_magnitude(value: f64) -> String {
    format!("{value}")
}

/// Label for a tiered discount in pre-sale mode. The copy shows the base
/// (un-bonused) percentage; the operation value carries base + bonus.
pub fn presale_tier_label(base_percent: f64) -> String {
    format!(
        "{} {}% OFF",
        LabelCategory::PreSaleTier.prefix(),
        format_magnitude(base_percent)
    )
}

/// Label for a tiered discount outside pre-sale mode.
pub fn tier_label(settings: &Settings, percent: f64) -> String {
    format!(
        "{} {} {}% OFF",
        LabelCategory::NormalTier.prefix(),
        settings.tier_copy,
        format_magnitude(percent)
    )
}

/// Label for a pre-sale per-model rule.
pub fn presale_rule_label(settings: &Settings, value: f64, kind: DiscountKind) -> String {
    let prefix = LabelCategory::PreSaleDiscount.prefix();
    match kind {
        DiscountKind::Percentage => format!(
            "{prefix} {} {}% OFF",
            settings.presale_copy,
            format_magnitude(value)
        ),
        DiscountKind::FixedAmount => format!(
            "{prefix} {} ${} OFF",
            settings.presale_copy,
            format_magnitude(value)
        ),
    }
}

/// Label for a normal per-model rule. Fixed-amount copy omits the
/// percentage suffix.
pub fn normal_rule_label(settings: &Settings, value: f64, kind: DiscountKind) -> String {
    let prefix = LabelCategory::NormalDiscount.prefix();
    match kind {
        DiscountKind::Percentage => format!(
            "{prefix} {} {}% OFF",
            settings.normal_copy,
            format_magnitude(value)
        ),
        DiscountKind::FixedAmount => format!("{prefix} {}", settings.normal_copy),
    }
}

/// Label for a bundle member: prefix + "Bundle" + 6 random uppercase
/// letters, capped at the configured length.
pub fn bundle_label(category: LabelCategory, settings: &Settings) -> String {
    let label = format!("{} Bundle{}", category.prefix(), random_letters(6));
    truncate_label(label, settings.max_label_len)
}

/// Caps a label at `max` characters.
fn truncate_label(label: String, max: usize) -> String {
    if label.chars().count() <= max {
        return label;
    }
    label.chars().take(max).collect()
}

/// Random uppercase A-Z letters, sourced from v4 UUID bytes.
fn random_letters(count: usize) -> String {
    Uuid::new_v4()
        .as_bytes()
        .iter()
        .take(count)
        .map(|byte| char::from(b'A' + *byte % 26))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(LabelCategory::PreSaleTier.prefix(), "[DC - PT]");
        assert_eq!(LabelCategory::NormalTier.prefix(), "[DC - NT]");
        assert_eq!(LabelCategory::PreSaleDiscount.prefix(), "[DC - PD]");
        assert_eq!(LabelCategory::NormalDiscount.prefix(), "[DC - ND]");
        assert_eq!(LabelCategory::PreSaleBundle.prefix(), "[DC - PB]");
        assert_eq!(LabelCategory::NormalBundle.prefix(), "[DC - NB]");
    }

    #[test]
    fn test_magnitude_formatting() {
        assert_eq!(format_magnitude(15.0), "15");
        assert_eq!(format_magnitude(12.5), "12.5");
        assert_eq!(format_magnitude(100.0), "100");
    }

    #[test]
    fn test_rule_labels() {
        let settings = Settings::default();
        assert_eq!(
            normal_rule_label(&settings, 10.0, DiscountKind::Percentage),
            "[DC - ND] Promo Discount 10% OFF"
        );
        // Fixed-amount copy omits the suffix entirely
        assert_eq!(
            normal_rule_label(&settings, 100.0, DiscountKind::FixedAmount),
            "[DC - ND] Promo Discount"
        );
        assert_eq!(
            presale_rule_label(&settings, 12.0, DiscountKind::Percentage),
            "[DC - PD] Pre-Sale Discount 12% OFF"
        );
        assert_eq!(
            presale_rule_label(&settings, 25.0, DiscountKind::FixedAmount),
            "[DC - PD] Pre-Sale Discount $25 OFF"
        );
        assert_eq!(
            tier_label(&settings, 15.0),
            "[DC - NT] Deals Crafter Code 15% OFF"
        );
        assert_eq!(presale_tier_label(15.0), "[DC - PT] 15% OFF");
    }

    #[test]
    fn test_bundle_label_shape() {
        let settings = Settings::default();
        let label = bundle_label(LabelCategory::NormalBundle, &settings);

        assert!(label.starts_with("[DC - NB] Bundle"));
        assert!(label.chars().count() <= settings.max_label_len);

        let suffix = label.strip_prefix("[DC - NB] Bundle").unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_bundle_label_truncation() {
        let settings = Settings {
            max_label_len: 12,
            ..Settings::default()
        };
        let label = bundle_label(LabelCategory::PreSaleBundle, &settings);
        assert_eq!(label.chars().count(), 12);
        assert!(label.starts_with("[DC - PB] Bu"));
    }
}
