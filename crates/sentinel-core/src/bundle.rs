//! # Bundle Partitioner
//!
//! Splits cart lines into bundle groups versus ordinary lines.
//!
//! A line joins a bundle group when it carries a non-empty bundle-handle
//! attribute AND its product's bundle catalog parses AND the catalog has an
//! entry for that handle with an item list. Every failure along that path
//! reclassifies the line as ordinary: it falls through to normal/tiered
//! pricing instead of being dropped. Safety fallback, not silent discarding.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::config::DiscountKind;
use crate::input::{value_to_f64, CartLine};

// =============================================================================
// Bundle Catalog (parsed from `crafterBundleConfig`)
// =============================================================================

/// The bundle-configuration blob a product carries:
/// `{"bundles":[{"handle":..., "config":{"items":[...]}}]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleCatalog {
    #[serde(default)]
    pub bundles: Vec<BundleEntry>,
}

impl BundleCatalog {
    /// Entry for a bundle handle; exact match, configuration order.
    pub fn entry(&self, handle: &str) -> Option<&BundleEntry> {
        self.bundles.iter().find(|entry| entry.handle == handle)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BundleEntry {
    pub handle: String,
    #[serde(default)]
    pub config: Option<BundleEntryConfig>,
}

impl BundleEntry {
    /// The configured member list, if present.
    pub fn items(&self) -> Option<&[BundleMember]> {
        self.config.as_ref()?.items.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BundleEntryConfig {
    #[serde(default)]
    pub items: Option<Vec<BundleMember>>,
}

/// One configured bundle member descriptor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleMember {
    /// Product id, informational only; matching is by handle.
    #[serde(default)]
    pub product: Option<String>,
    pub handle: String,
    /// Normal discount amount. Raw so one malformed member skips only itself.
    #[serde(default)]
    pub amount: Value,
    /// Pre-sale discount amount.
    #[serde(default)]
    pub pre_sale_amount: Value,
    /// `"percentage"` or `"fixed_amount"`.
    #[serde(rename = "type", default)]
    pub discount_type: Option<String>,
}

impl BundleMember {
    pub fn amount_value(&self) -> Option<f64> {
        value_to_f64(&self.amount)
    }

    pub fn pre_sale_amount_value(&self) -> Option<f64> {
        value_to_f64(&self.pre_sale_amount)
    }

    pub fn kind(&self) -> Option<DiscountKind> {
        self.discount_type.as_deref().and_then(DiscountKind::parse)
    }
}

// =============================================================================
// Partition
// =============================================================================

/// One cart line participating in a bundle group.
#[derive(Debug, Clone)]
pub struct BundleParticipant {
    /// The product handle used to match against configured members.
    pub product_handle: String,
    /// Line subtotal, carried for reporting; never used in selection.
    pub price: f64,
    /// Cart-line id the resulting operation will target.
    pub line_id: String,
}

/// All cart lines sharing one bundle handle, plus the shared member
/// configuration (taken once per handle, from whichever line supplies it).
#[derive(Debug, Clone)]
pub struct BundleGroup {
    pub handle: String,
    pub members: Vec<BundleMember>,
    pub participants: Vec<BundleParticipant>,
}

/// Result of splitting the cart: bundle groups in first-appearance order,
/// and everything else in arrival order.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub groups: Vec<BundleGroup>,
    pub ordinary: Vec<&'a CartLine>,
}

/// Partitions cart lines by bundle membership. See the module docs for the
/// reclassification fallback.
pub fn partition_lines(lines: &[CartLine]) -> Partition<'_> {
    let mut partition = Partition::default();

    for line in lines {
        let handle = match line.bundle_handle() {
            Some(handle) => handle,
            None => {
                partition.ordinary.push(line);
                continue;
            }
        };

        let raw = line
            .product()
            .crafter_bundle_config
            .as_ref()
            .and_then(|attr| attr.value.as_deref());
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                partition.ordinary.push(line);
                continue;
            }
        };

        let catalog: BundleCatalog = match serde_json::from_str(raw) {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!(handle, error = %err, "unparseable bundle catalog, line falls back to ordinary pricing");
                partition.ordinary.push(line);
                continue;
            }
        };

        let members = match catalog.entry(handle).and_then(BundleEntry::items) {
            Some(items) => items.to_vec(),
            None => {
                warn!(handle, "bundle handle has no configured items, line falls back to ordinary pricing");
                partition.ordinary.push(line);
                continue;
            }
        };

        let participant = BundleParticipant {
            product_handle: line.product().handle.clone().unwrap_or_default(),
            price: line.cost.subtotal_amount.amount,
            line_id: line.id.clone(),
        };

        match partition
            .groups
            .iter_mut()
            .find(|group| group.handle == handle)
        {
            Some(group) => {
                // Each line re-supplies the same shared config; keep the latest
                group.members = members;
                group.participants.push(participant);
            }
            None => partition.groups.push(BundleGroup {
                handle: handle.to_string(),
                members,
                participants: vec![participant],
            }),
        }
    }

    partition
}

// =============================================================================
// Unit Tests
// =============================================================================
