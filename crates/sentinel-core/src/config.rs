//! # Configuration Resolver
//!
//! Merchant pricing configuration travels as five JSON-encoded strings
//! attached to product records. This module locates the representative
//! product in the cart and parses those fields into [`PricingConfig`].
//!
//! ## Resolution Contract
//! ```text
//! scan cart lines in order
//!      │
//!      ▼
//! first line whose product type matches the eligible category
//! AND whose title lacks the exclusion marker
//!      │
//!      ├── none found → None (caller treats as "no discounts apply")
//!      │
//!      ▼
//! parse each of the five fields INDEPENDENTLY
//!      └── a field that fails to parse logs a warning and resolves to
//!          None; it never aborts the resolution of the other fields
//! ```

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

use crate::input::{lenient_i64, value_to_f64, AttributeValue, CartLine};
use crate::settings::Settings;

// =============================================================================
// Discount Kind
// =============================================================================

/// Closed set of discount magnitudes.
///
/// The merchant data spells this three ways: tiered cells are implicitly
/// `percentage`, normal/pre-sale rules use `"percentage"` / `"amount"`, and
/// bundle members use `"percentage"` / `"fixed_amount"`. Anything else is
/// rejected at parse time so a new type string can never silently fall
/// through to the wrong arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    Percentage,
    FixedAmount,
}

impl DiscountKind {
    /// Parses a raw discount-type string, tolerating stray whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "percentage" => Some(DiscountKind::Percentage),
            "amount" | "fixed_amount" => Some(DiscountKind::FixedAmount),
            _ => None,
        }
    }
}

// =============================================================================
// Configuration Types
// =============================================================================

/// A quantity tier: inclusive [min, max] range over aggregate eligible
/// quantity. Tiers are non-overlapping by contract; this is NOT enforced at
/// runtime (first match wins in configuration order, and merchant data may
/// rely on scan order). See the `lint` module for the offline overlap check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tier {
    #[serde(rename = "tier")]
    pub name: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub min: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub max: i64,
}

impl Tier {
    /// Inclusive range check.
    pub fn contains(&self, quantity: i64) -> bool {
        quantity >= self.min && quantity <= self.max
    }
}

/// One row of the tiered discount table: the tier name plus one column per
/// model code (`"_35i": "15"`). Cells are implicitly percentages.
#[derive(Debug, Clone, Deserialize)]
pub struct TierDiscountRow {
    pub tier: String,
    #[serde(flatten)]
    pub cells: BTreeMap<String, Value>,
}

impl TierDiscountRow {
    /// Looks up the cell for a model code (with its leading underscore).
    /// Missing or unparseable cells yield `None` and the line is skipped.
    pub fn discount_for(&self, model_code: &str) -> Option<f64> {
        self.cells.get(model_code).and_then(value_to_f64)
    }
}

/// One normal or pre-sale discount rule, keyed by model code without its
/// leading underscore (`{"product":"35i","discount":"10","discount_type":
/// "percentage"}`).
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountRule {
    pub product: String,
    /// Kept raw so one malformed row skips only itself, not its siblings.
    #[serde(default)]
    pub discount: Value,
    #[serde(default)]
    pub discount_type: Option<String>,
}

impl DiscountRule {
    /// The rule's numeric magnitude, if parseable.
    pub fn value(&self) -> Option<f64> {
        value_to_f64(&self.discount)
    }

    /// The rule's discount kind, if the type string is a known one.
    pub fn kind(&self) -> Option<DiscountKind> {
        self.discount_type.as_deref().and_then(DiscountKind::parse)
    }

    /// First rule matching a model code, scanning in configuration order.
    pub fn find<'a>(rules: &'a [DiscountRule], model_code: &str) -> Option<&'a DiscountRule> {
        let key = model_code.trim_start_matches('_');
        rules.iter().find(|rule| rule.product == key)
    }
}

/// The pre-sale tier bonus blob: `{"amount": "5"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PreSaleBonus {
    #[serde(default)]
    pub amount: Value,
}

impl PreSaleBonus {
    /// The bonus magnitude; an unparseable amount degrades to zero, which
    /// also keeps bundles on their normal (non-pre-sale) amounts.
    pub fn value(&self) -> f64 {
        value_to_f64(&self.amount).unwrap_or(0.0)
    }
}

/// Everything the evaluator needs from the representative product. Each
/// field is independently optional: a missing or unparseable blob leaves
/// only that field as `None`.
#[derive(Debug, Clone, Default)]
pub struct PricingConfig {
    pub tiers: Option<Vec<Tier>>,
    pub tier_discounts: Option<Vec<TierDiscountRow>>,
    pub normal_discounts: Option<Vec<DiscountRule>>,
    pub presale_discounts: Option<Vec<DiscountRule>>,
    pub presale_bonus: Option<PreSaleBonus>,
}

impl PricingConfig {
    /// First tier whose inclusive range contains the aggregate quantity,
    /// in configuration order. Missing tiers config means no tier is active.
    pub fn select_tier(&self, quantity: i64) -> Option<&Tier> {
        self.tiers
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|tier| tier.contains(quantity))
    }

    /// The tiered-table row for a tier name, first match wins.
    pub fn tier_row(&self, tier_name: &str) -> Option<&TierDiscountRow> {
        self.tier_discounts
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|row| row.tier == tier_name)
    }

    /// The pre-sale tier bonus, zero when absent.
    pub fn presale_bonus_value(&self) -> f64 {
        self.presale_bonus
            .as_ref()
            .map(PreSaleBonus::value)
            .unwrap_or(0.0)
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the merchant configuration from the first eligible cart line.
///
/// Returns `None` when no line's product passes the category gate, in which
/// case no discounts apply at all.
pub fn resolve_configuration(lines: &[CartLine], settings: &Settings) -> Option<PricingConfig> {
    let line = lines.iter().find(|line| {
        let product = line.product();
        product.product_type == settings.product_type
            && !settings.is_excluded_title(&product.title)
    })?;
    let product = line.product();

    Some(PricingConfig {
        tiers: parse_field(&product.tiers_config, "tiersConfig"),
        tier_discounts: parse_field(&product.discounts_config, "discountsConfig"),
        normal_discounts: parse_field(&product.normal_config, "normalConfig"),
        presale_discounts: parse_field(&product.presale_config, "presaleConfig"),
        presale_bonus: parse_field(&product.presale_extra_tier_config, "presaleExtraTierConfig"),
    })
}

/// Parses one JSON-encoded configuration field. Failures are logged and
/// resolve to `None` rather than aborting the whole resolution.
pub(crate) fn parse_field<T: DeserializeOwned>(
    attr: &Option<AttributeValue>,
    field: &'static str,
) -> Option<T> {
    let raw = attr.as_ref()?.value.as_deref()?;
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(field, error = %err, "skipping unparseable configuration field");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
