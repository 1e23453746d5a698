//! # Configuration Lints
//!
//! Offline advisory checks over merchant configuration. Tiers are
//! non-overlapping by contract but the evaluator deliberately does not
//! enforce that at runtime (first match wins, and merchant data may rely on
//! scan order); these lints are where overlaps and similar authoring
//! mistakes get surfaced instead, e.g. from an admin-side save hook.
//!
//! Nothing here is ever consulted on the evaluation path.

use std::collections::HashSet;

use thiserror::Error;

use crate::bundle::BundleCatalog;
use crate::config::{DiscountKind, PricingConfig};

/// One advisory finding. Never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigLint {
    /// Two tiers cover a common quantity; the earlier one always wins.
    #[error("tiers '{first}' and '{second}' overlap; '{first}' always wins for the shared range")]
    OverlappingTiers { first: String, second: String },

    /// A tier is inverted (min above max) and can never match.
    #[error("tier '{tier}' has min {min} above max {max} and can never match")]
    InvertedTier { tier: String, min: i64, max: i64 },

    /// A tier has no row in the tiered discount table; if it activates,
    /// the whole evaluation comes back empty.
    #[error("tier '{tier}' has no row in the tiered discount table")]
    TierWithoutRow { tier: String },

    /// Two rules share a model code; the earlier one always wins.
    #[error("duplicate rule for model code '{product}' in {table} table; the first always wins")]
    DuplicateRule { table: &'static str, product: String },

    /// A rule's discount type is not a known kind, so the rule is dead.
    #[error("rule for model code '{product}' in {table} table has unknown discount type {raw:?}")]
    UnknownDiscountType {
        table: &'static str,
        product: String,
        raw: String,
    },

    /// A bundle percentage above 100 will be clamped at evaluation time.
    #[error("bundle '{bundle}' member '{handle}' has percentage {amount} (clamped to 100 at checkout)")]
    BundlePercentageOver100 {
        bundle: String,
        handle: String,
        amount: f64,
    },

    /// Two members of one bundle share a handle; only arrival order decides
    /// which cart line consumes which.
    #[error("bundle '{bundle}' configures handle '{handle}' more than once")]
    DuplicateBundleMember { bundle: String, handle: String },
}

/// Lints a resolved pricing configuration.
pub fn lint_pricing_config(config: &PricingConfig) -> Vec<ConfigLint> {
    let mut findings = Vec::new();

    let tiers = config.tiers.as_deref().unwrap_or_default();
    for (index, tier) in tiers.iter().enumerate() {
        if tier.min > tier.max {
            findings.push(ConfigLint::InvertedTier {
                tier: tier.name.clone(),
                min: tier.min,
                max: tier.max,
            });
        }
        for later in &tiers[index + 1..] {
            if tier.min <= later.max && later.min <= tier.max {
                findings.push(ConfigLint::OverlappingTiers {
                    first: tier.name.clone(),
                    second: later.name.clone(),
                });
            }
        }
        if config.tier_row(&tier.name).is_none() {
            findings.push(ConfigLint::TierWithoutRow {
                tier: tier.name.clone(),
            });
        }
    }

    lint_rules(
        "normal",
        config.normal_discounts.as_deref().unwrap_or_default(),
        &mut findings,
    );
    lint_rules(
        "pre-sale",
        config.presale_discounts.as_deref().unwrap_or_default(),
        &mut findings,
    );

    findings
}

fn lint_rules(
    table: &'static str,
    rules: &[crate::config::DiscountRule],
    findings: &mut Vec<ConfigLint>,
) {
    let mut seen = HashSet::new();
    for rule in rules {
        if !seen.insert(rule.product.clone()) {
            findings.push(ConfigLint::DuplicateRule {
                table,
                product: rule.product.clone(),
            });
        }
        if rule.kind().is_none() {
            findings.push(ConfigLint::UnknownDiscountType {
                table,
                product: rule.product.clone(),
                raw: rule.discount_type.clone().unwrap_or_default(),
            });
        }
    }
}

/// Lints a product's bundle catalog.
pub fn lint_bundle_catalog(catalog: &BundleCatalog) -> Vec<ConfigLint> {
    let mut findings = Vec::new();

    for entry in &catalog.bundles {
        let mut seen = HashSet::new();
        for member in entry.items().unwrap_or_default() {
            let key = member.handle.to_lowercase();
            if !seen.insert(key) {
                findings.push(ConfigLint::DuplicateBundleMember {
                    bundle: entry.handle.clone(),
                    handle: member.handle.clone(),
                });
            }
            if member.kind() == Some(DiscountKind::Percentage) {
                for amount in [member.amount_value(), member.pre_sale_amount_value()]
                    .into_iter()
                    .flatten()
                {
                    if amount > 100.0 {
                        findings.push(ConfigLint::BundlePercentageOver100 {
                            bundle: entry.handle.clone(),
                            handle: member.handle.clone(),
                            amount,
                        });
                    }
                }
            }
        }
    }

    findings
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tier_overlap_and_inversion() {
        let config = PricingConfig {
            tiers: Some(
                serde_json::from_value(json!([
                    { "tier": "Tier 1", "min": 2, "max": 4 },
                    { "tier": "Tier 2", "min": 4, "max": 6 },
                    { "tier": "Tier 3", "min": 9, "max": 7 }
                ]))
                .unwrap(),
            ),
            tier_discounts: Some(
                serde_json::from_value(json!([
                    { "tier": "Tier 1", "_35i": "15" },
                    { "tier": "Tier 2", "_35i": "17" },
                    { "tier": "Tier 3", "_35i": "19" }
                ]))
                .unwrap(),
            ),
            ..PricingConfig::default()
        };

        let findings = lint_pricing_config(&config);
        assert!(findings.contains(&ConfigLint::OverlappingTiers {
            first: "Tier 1".to_string(),
            second: "Tier 2".to_string(),
        }));
        assert!(findings.contains(&ConfigLint::InvertedTier {
            tier: "Tier 3".to_string(),
            min: 9,
            max: 7,
        }));
    }

    #[test]
    fn test_tier_without_row() {
        let config = PricingConfig {
            tiers: Some(
                serde_json::from_value(json!([{ "tier": "Tier 1", "min": 2, "max": 2 }])).unwrap(),
            ),
            tier_discounts: Some(serde_json::from_value(json!([])).unwrap()),
            ..PricingConfig::default()
        };
        assert_eq!(
            lint_pricing_config(&config),
            vec![ConfigLint::TierWithoutRow {
                tier: "Tier 1".to_string()
            }]
        );
    }

    #[test]
    fn test_rule_lints() {
        let config = PricingConfig {
            normal_discounts: Some(
                serde_json::from_value(json!([
                    { "product": "35i", "discount": "10", "discount_type": "percentage" },
                    { "product": "35i", "discount": "20", "discount_type": "percentage" },
                    { "product": "75i", "discount": "5", "discount_type": "bogof" }
                ]))
                .unwrap(),
            ),
            ..PricingConfig::default()
        };

        let findings = lint_pricing_config(&config);
        assert!(findings.contains(&ConfigLint::DuplicateRule {
            table: "normal",
            product: "35i".to_string(),
        }));
        assert!(findings.contains(&ConfigLint::UnknownDiscountType {
            table: "normal",
            product: "75i".to_string(),
            raw: "bogof".to_string(),
        }));
    }

    #[test]
    fn test_bundle_lints() {
        let catalog: BundleCatalog = serde_json::from_value(json!({
            "bundles": [{
                "handle": "b",
                "config": { "items": [
                    { "handle": "x", "amount": 150, "type": "percentage" },
                    { "handle": "X", "amount": 10, "type": "percentage" }
                ]}
            }]
        }))
        .unwrap();

        let findings = lint_bundle_catalog(&catalog);
        assert!(findings.contains(&ConfigLint::BundlePercentageOver100 {
            bundle: "b".to_string(),
            handle: "x".to_string(),
            amount: 150.0,
        }));
        assert!(findings.contains(&ConfigLint::DuplicateBundleMember {
            bundle: "b".to_string(),
            handle: "X".to_string(),
        }));
    }
}
