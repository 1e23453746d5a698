//! # Cart Snapshot Types
//!
//! The inbound wire shape for one evaluation: an ordered list of cart lines
//! (each carrying a product snapshot with raw JSON-valued configuration
//! fields) plus the discount context naming the active discount classes.
//!
//! ## Wire Leniency
//! Merchant-authored configuration stores numbers as strings (`"min": "2"`)
//! or numbers (`"amount": 20`) interchangeably, so every numeric field that
//! originates from merchant JSON goes through the lenient converters at the
//! bottom of this module. Platform-supplied fields (`quantity`, line ids)
//! are strictly typed.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

// =============================================================================
// Cart Lines Input
// =============================================================================

/// Input to the cart-lines discount function.
#[derive(Debug, Clone, Deserialize)]
pub struct CartInput {
    pub cart: Cart,
    pub discount: DiscountContext,
}

/// The cart snapshot: an ordered, immutable list of lines.
#[derive(Debug, Clone, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

/// Which discount classes the invoking context activated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountContext {
    #[serde(default)]
    pub discount_classes: Vec<DiscountClass>,
}

/// Closed set of platform discount classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountClass {
    Product,
    Order,
    Shipping,
}

/// One line in the checkout cart.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub quantity: i64,
    pub merchandise: Merchandise,
    pub cost: LineCost,

    /// Custom attribute: `"true"` flips the cart-wide pre-sale pricing mode.
    #[serde(default)]
    pub is_pre_sale_product: Option<AttributeValue>,

    /// Custom attribute: handle of the bundle this line belongs to, if any.
    #[serde(default)]
    pub crafter_bundle_name: Option<AttributeValue>,
}

impl CartLine {
    /// True when this line carries the pre-sale flag set to the string
    /// `"true"`. Any single flagged line flips pricing mode for the whole
    /// cart (documented merchant-configuration quirk, preserved as-is).
    pub fn is_pre_sale(&self) -> bool {
        self.is_pre_sale_product
            .as_ref()
            .and_then(|attr| attr.value.as_deref())
            .map(|v| v == "true")
            .unwrap_or(false)
    }

    /// Non-empty bundle handle, if this line was tagged into a bundle.
    pub fn bundle_handle(&self) -> Option<&str> {
        self.crafter_bundle_name
            .as_ref()
            .and_then(|attr| attr.value.as_deref())
            .filter(|v| !v.is_empty())
    }

    /// Shorthand for the product snapshot.
    pub fn product(&self) -> &ProductSnapshot {
        &self.merchandise.product
    }
}

/// Merchandise reference on a line.
#[derive(Debug, Clone, Deserialize)]
pub struct Merchandise {
    pub product: ProductSnapshot,
}

/// Line-level cost subtotal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineCost {
    pub subtotal_amount: MoneyAmount,
}

/// A monetary amount as the platform serializes it (number or decimal
/// string).
#[derive(Debug, Clone, Deserialize)]
pub struct MoneyAmount {
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: f64,
}

/// Product snapshot referenced by a line's merchandise.
///
/// The five `*_config` fields plus `crafter_bundle_config` are raw
/// JSON-encoded strings authored by the admin app; parsing them is the
/// configuration resolver's job (`config` / `bundle` modules), not serde's.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub handle: Option<String>,
    pub product_type: String,

    #[serde(default)]
    pub tiers_config: Option<AttributeValue>,
    #[serde(default)]
    pub discounts_config: Option<AttributeValue>,
    #[serde(default)]
    pub normal_config: Option<AttributeValue>,
    #[serde(default)]
    pub presale_config: Option<AttributeValue>,
    #[serde(default)]
    pub presale_extra_tier_config: Option<AttributeValue>,
    #[serde(default)]
    pub crafter_bundle_config: Option<AttributeValue>,
}

/// A custom attribute or metafield wrapper: the platform nests the payload
/// under `value`, which may be null.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeValue {
    #[serde(default)]
    pub value: Option<String>,
}

// =============================================================================
// Delivery Input
// =============================================================================

/// Input to the delivery-options companion function.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryInput {
    pub cart: DeliveryCart,
    pub discount: DiscountContext,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryCart {
    #[serde(default)]
    pub delivery_groups: Vec<DeliveryGroup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryGroup {
    pub id: String,
}

// =============================================================================
// Lenient Numeric Conversion
// =============================================================================

/// Converts a JSON value that should be a number but may arrive as a string.
pub(crate) fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Integer variant of [`value_to_f64`]; decimal inputs truncate.
pub(crate) fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

/// serde adapter over [`value_to_f64`].
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_f64(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a number, got {value}")))
}

/// serde adapter over [`value_to_i64`].
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_i64(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected an integer, got {value}")))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cart_line_attributes() {
        let line: CartLine = serde_json::from_value(json!({
            "id": "gid://shopify/CartLine/0",
            "quantity": 2,
            "merchandise": {
                "product": {
                    "title": "Air Purifier 35i",
                    "productType": "Air Purifier"
                }
            },
            "cost": { "subtotalAmount": { "amount": "269.00" } },
            "isPreSaleProduct": { "value": "true" },
            "crafterBundleName": { "value": "" }
        }))
        .unwrap();

        assert!(line.is_pre_sale());
        // Empty bundle handle counts as no bundle
        assert_eq!(line.bundle_handle(), None);
        assert_eq!(line.cost.subtotal_amount.amount, 269.0);
    }

    #[test]
    fn test_pre_sale_flag_is_literal_true() {
        let line: CartLine = serde_json::from_value(json!({
            "id": "gid://shopify/CartLine/0",
            "quantity": 1,
            "merchandise": {
                "product": { "title": "x", "productType": "Air Purifier" }
            },
            "cost": { "subtotalAmount": { "amount": 1 } },
            "isPreSaleProduct": { "value": "TRUE" }
        }))
        .unwrap();

        // Only the exact string "true" flips the flag
        assert!(!line.is_pre_sale());
    }

    #[test]
    fn test_discount_class_wire_names() {
        let ctx: DiscountContext = serde_json::from_value(json!({
            "discountClasses": ["PRODUCT", "ORDER", "SHIPPING"]
        }))
        .unwrap();
        assert_eq!(
            ctx.discount_classes,
            vec![
                DiscountClass::Product,
                DiscountClass::Order,
                DiscountClass::Shipping
            ]
        );
    }

    #[test]
    fn test_lenient_numbers() {
        assert_eq!(value_to_f64(&json!("15")), Some(15.0));
        assert_eq!(value_to_f64(&json!(" 12.5 ")), Some(12.5));
        assert_eq!(value_to_f64(&json!(20)), Some(20.0));
        assert_eq!(value_to_f64(&json!("n/a")), None);
        assert_eq!(value_to_f64(&json!(null)), None);

        assert_eq!(value_to_i64(&json!("999999999")), Some(999_999_999));
        assert_eq!(value_to_i64(&json!(2.0)), Some(2));
        assert_eq!(value_to_i64(&json!("3.0")), Some(3));
    }
}
