//! # Evaluator Settings
//!
//! The merchant-operations knobs that gate and label discount calculation.
//!
//! The defaults mirror the production storefront: only "Air Purifier"
//! products participate, model codes are derived from product titles, and
//! titles carrying the `BG` marker (bundle-picker SKUs) are excluded from
//! both pricing and quantity aggregation.
//!
//! Settings are threaded by reference through the evaluator. There is no
//! global mutable configuration anywhere in this crate.

use serde::{Deserialize, Serialize};

/// Knobs for one evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Kill switch. When false the evaluator returns an empty operation
    /// list for every input (it never errors on this path).
    pub enabled: bool,

    /// Product type that participates in discounting (category gate).
    pub product_type: String,

    /// Known model codes, checked in order against normalized titles.
    /// The leading underscore matches the tiered-table column names;
    /// normal/pre-sale rules key on the code without it.
    pub model_codes: Vec<String>,

    /// Titles containing this marker never price and never count toward
    /// tier quantity.
    pub exclusion_marker: String,

    /// Human copy for normal (non-tiered, non-pre-sale) discounts.
    pub normal_copy: String,

    /// Human copy for tiered discounts.
    pub tier_copy: String,

    /// Human copy for pre-sale discounts.
    pub presale_copy: String,

    /// Human copy for the delivery companion's free-shipping candidate.
    pub delivery_copy: String,

    /// Hard cap on generated label length, in characters.
    pub max_label_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            enabled: true,
            product_type: "Air Purifier".to_string(),
            model_codes: vec![
                "_25i".to_string(),
                "_35i".to_string(),
                "_45i".to_string(),
                "_75i".to_string(),
                "_flex".to_string(),
            ],
            exclusion_marker: "BG".to_string(),
            normal_copy: "Promo Discount".to_string(),
            tier_copy: "Deals Crafter Code".to_string(),
            presale_copy: "Pre-Sale Discount".to_string(),
            delivery_copy: "FREE DELIVERY".to_string(),
            max_label_len: 50,
        }
    }
}

impl Settings {
    /// Derives the model code for a product title, e.g. `"_35i"` for
    /// "Air Purifier 35i".
    ///
    /// Matching is a normalized substring check: the title is lowercased and
    /// stripped of whitespace, each known code is stripped of its leading
    /// underscore and lowercased, and the first code contained in the title
    /// wins. Titles matching no known code yield `None` and the line is
    /// skipped (no discount, no error).
    pub fn model_code(&self, title: &str) -> Option<&str> {
        let normalized: String = title
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        self.model_codes
            .iter()
            .find(|code| {
                let needle = code.trim_start_matches('_').to_lowercase();
                !needle.is_empty() && normalized.contains(&needle)
            })
            .map(String::as_str)
    }

    /// True when a title carries the exclusion marker.
    pub fn is_excluded_title(&self, title: &str) -> bool {
        !self.exclusion_marker.is_empty() && title.contains(&self.exclusion_marker)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
