//! # Delivery Discount Companion
//!
//! Structurally simpler sibling of the cart-lines evaluator: no tiering, no
//! bundles, a single free-delivery candidate against the first delivery
//! group. Same input/output shape (cart + discount context in, operations
//! out) and the same precondition taxonomy.

use crate::error::{EvaluateError, EvaluateResult};
use crate::input::{DeliveryInput, DiscountClass};
use crate::output::{
    Candidate, CandidateValue, DeliveryDiscountsAdd, DeliverySelectionStrategy,
    GenerateRunResult, Operation, Target,
};
use crate::settings::Settings;

/// Evaluates the shipping discount for one cart snapshot.
///
/// ## Preconditions, in order
/// - kill switch disabled → empty result
/// - no delivery groups → [`EvaluateError::NoDeliveryGroups`] (hard error)
/// - Shipping discount class absent → empty result
pub fn cart_delivery_options_discounts_generate_run(
    input: &DeliveryInput,
    settings: &Settings,
) -> EvaluateResult<GenerateRunResult> {
    if !settings.enabled {
        return Ok(GenerateRunResult::empty());
    }

    let first_group = input
        .cart
        .delivery_groups
        .first()
        .ok_or(EvaluateError::NoDeliveryGroups)?;

    if !input
        .discount
        .discount_classes
        .contains(&DiscountClass::Shipping)
    {
        return Ok(GenerateRunResult::empty());
    }

    Ok(GenerateRunResult {
        operations: vec![Operation::DeliveryDiscountsAdd(DeliveryDiscountsAdd {
            candidates: vec![Candidate {
                message: settings.delivery_copy.clone(),
                targets: vec![Target::delivery_group(first_group.id.clone())],
                value: CandidateValue::percentage(100.0),
            }],
            selection_strategy: DeliverySelectionStrategy::All,
        })],
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn delivery_input(groups: Vec<&str>, classes: Vec<&str>) -> DeliveryInput {
        serde_json::from_value(json!({
            "cart": {
                "deliveryGroups": groups.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>()
            },
            "discount": { "discountClasses": classes }
        }))
        .unwrap()
    }

    #[test]
    fn test_no_delivery_groups_is_a_hard_error() {
        let input = delivery_input(vec![], vec!["SHIPPING"]);
        let err =
            cart_delivery_options_discounts_generate_run(&input, &Settings::default()).unwrap_err();
        assert_eq!(err, EvaluateError::NoDeliveryGroups);
    }

    #[test]
    fn test_missing_shipping_class_returns_empty() {
        let input = delivery_input(vec!["gid://shopify/CartDeliveryGroup/0"], vec!["PRODUCT"]);
        let result =
            cart_delivery_options_discounts_generate_run(&input, &Settings::default()).unwrap();
        assert_eq!(result, GenerateRunResult::empty());
    }

    #[test]
    fn test_free_delivery_on_first_group() {
        let input = delivery_input(
            vec![
                "gid://shopify/CartDeliveryGroup/0",
                "gid://shopify/CartDeliveryGroup/1",
            ],
            vec!["SHIPPING", "PRODUCT"],
        );
        let result =
            cart_delivery_options_discounts_generate_run(&input, &Settings::default()).unwrap();

        let Operation::DeliveryDiscountsAdd(add) = &result.operations[0] else {
            panic!("expected a delivery operation");
        };
        assert_eq!(add.selection_strategy, DeliverySelectionStrategy::All);
        assert_eq!(add.candidates.len(), 1);
        assert_eq!(add.candidates[0].message, "FREE DELIVERY");
        assert_eq!(add.candidates[0].value, CandidateValue::percentage(100.0));
        assert_eq!(
            add.candidates[0].targets,
            vec![Target::delivery_group("gid://shopify/CartDeliveryGroup/0")]
        );
    }

    #[test]
    fn test_kill_switch_returns_empty() {
        let settings = Settings {
            enabled: false,
            ..Settings::default()
        };
        let input = delivery_input(vec![], vec!["SHIPPING"]);
        let result = cart_delivery_options_discounts_generate_run(&input, &settings).unwrap();
        assert_eq!(result, GenerateRunResult::empty());
    }
}
