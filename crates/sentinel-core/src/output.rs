//! # Discount Operation Types
//!
//! The outbound wire shape: a list of operations, each an externally tagged
//! `productDiscountsAdd` or `deliveryDiscountsAdd` carrying candidates and a
//! selection strategy.
//!
//! Invariant: exactly one candidate per cart line that receives a discount
//! (ordinary lines) or per bundle member consumed (bundle lines); a line
//! never appears as a target twice.

use serde::Serialize;

/// The full function result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRunResult {
    pub operations: Vec<Operation>,
}

impl GenerateRunResult {
    /// The "no discounts apply" result. Distinct from an error: checkout
    /// simply sees no discount.
    pub fn empty() -> Self {
        GenerateRunResult { operations: vec![] }
    }
}

/// One discount operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    ProductDiscountsAdd(ProductDiscountsAdd),
    DeliveryDiscountsAdd(DeliveryDiscountsAdd),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDiscountsAdd {
    pub candidates: Vec<Candidate>,
    pub selection_strategy: ProductSelectionStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDiscountsAdd {
    pub candidates: Vec<Candidate>,
    pub selection_strategy: DeliverySelectionStrategy,
}

/// How the platform picks among product candidates. This evaluator always
/// emits `All`; the other variants exist because the platform accepts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductSelectionStrategy {
    All,
    First,
    Maximum,
}

/// How the platform picks among delivery candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliverySelectionStrategy {
    All,
}

/// One discount candidate: label, target lines, magnitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub message: String,
    pub targets: Vec<Target>,
    pub value: CandidateValue,
}

/// What a candidate applies to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Target {
    CartLine(CartLineTarget),
    DeliveryGroup(DeliveryGroupTarget),
}

impl Target {
    pub fn cart_line(id: impl Into<String>) -> Self {
        Target::CartLine(CartLineTarget { id: id.into() })
    }

    pub fn delivery_group(id: impl Into<String>) -> Self {
        Target::DeliveryGroup(DeliveryGroupTarget { id: id.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineTarget {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryGroupTarget {
    pub id: String,
}

/// Discount magnitude: percentage or fixed amount, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CandidateValue {
    Percentage(Percentage),
    FixedAmount(FixedAmount),
}

impl CandidateValue {
    pub fn percentage(value: f64) -> Self {
        CandidateValue::Percentage(Percentage { value })
    }

    pub fn fixed_amount(amount: f64) -> Self {
        CandidateValue::FixedAmount(FixedAmount { amount })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Percentage {
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedAmount {
    pub amount: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_wire_shape() {
        let op = Operation::ProductDiscountsAdd(ProductDiscountsAdd {
            candidates: vec![Candidate {
                message: "[DC - ND] Promo Discount 10% OFF".to_string(),
                targets: vec![Target::cart_line("gid://shopify/CartLine/0")],
                value: CandidateValue::percentage(10.0),
            }],
            selection_strategy: ProductSelectionStrategy::All,
        });

        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "productDiscountsAdd": {
                    "candidates": [
                        {
                            "message": "[DC - ND] Promo Discount 10% OFF",
                            "targets": [{ "cartLine": { "id": "gid://shopify/CartLine/0" } }],
                            "value": { "percentage": { "value": 10.0 } }
                        }
                    ],
                    "selectionStrategy": "ALL"
                }
            })
        );
    }

    #[test]
    fn test_delivery_wire_shape() {
        let op = Operation::DeliveryDiscountsAdd(DeliveryDiscountsAdd {
            candidates: vec![Candidate {
                message: "FREE DELIVERY".to_string(),
                targets: vec![Target::delivery_group("gid://shopify/CartDeliveryGroup/0")],
                value: CandidateValue::percentage(100.0),
            }],
            selection_strategy: DeliverySelectionStrategy::All,
        });

        let wire = serde_json::to_value(&op).unwrap();
        assert_eq!(
            wire["deliveryDiscountsAdd"]["selectionStrategy"],
            json!("ALL")
        );
        assert_eq!(
            wire["deliveryDiscountsAdd"]["candidates"][0]["targets"][0],
            json!({ "deliveryGroup": { "id": "gid://shopify/CartDeliveryGroup/0" } })
        );
    }

    #[test]
    fn test_fixed_amount_wire_shape() {
        let value = CandidateValue::fixed_amount(100.0);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({ "fixedAmount": { "amount": 100.0 } })
        );
    }
}
