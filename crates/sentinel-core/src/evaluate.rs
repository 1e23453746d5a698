//! # Cart-Lines Discount Evaluation
//!
//! The checkout-time entry point: given a cart snapshot and the resolved
//! merchant configuration, deterministically pick one discount per eligible
//! line (or bundle member) and emit the operation list.
//!
//! ## Selection per ordinary line
//! ```text
//! (tier active?, pre-sale mode?)
//!      │
//!      ├── (yes, yes) → tiered cell + pre-sale bonus   [DC - PT]
//!      ├── (yes, no)  → tiered cell                    [DC - NT]
//!      ├── (no,  yes) → pre-sale per-model rule        [DC - PD]
//!      └── (no,  no)  → normal per-model rule          [DC - ND]
//! ```
//! Bundle members take `[DC - PB]` / `[DC - NB]` instead and never enter the
//! table above. Exactly one category applies to any line.
//!
//! Both flags are computed once per invocation and passed down as plain
//! values; nothing in this module mutates shared state. Pre-sale mode is
//! cart-wide: one flagged line flips pricing for every line (documented
//! merchant-configuration quirk, preserved deliberately).

use tracing::debug;

use crate::bundle::{partition_lines, BundleGroup, Partition};
use crate::config::{
    resolve_configuration, DiscountKind, DiscountRule, PricingConfig, TierDiscountRow,
};
use crate::error::{EvaluateError, EvaluateResult};
use crate::input::{CartInput, CartLine, DiscountClass};
use crate::label::{self, LabelCategory};
use crate::output::{
    Candidate, CandidateValue, GenerateRunResult, Operation, ProductDiscountsAdd,
    ProductSelectionStrategy, Target,
};
use crate::settings::Settings;

/// Evaluates product discounts for one cart snapshot.
///
/// ## Preconditions, in order
/// - kill switch disabled → empty result
/// - empty cart → [`EvaluateError::EmptyCart`] (hard error, P1)
/// - Product discount class absent → empty result
/// - no eligible configuration source in the cart → empty result
/// - active tier without a tiered-table row, or no tier and no normal
///   table → empty result
pub fn cart_lines_discounts_generate_run(
    input: &CartInput,
    settings: &Settings,
) -> EvaluateResult<GenerateRunResult> {
    if !settings.enabled {
        return Ok(GenerateRunResult::empty());
    }
    if input.cart.lines.is_empty() {
        return Err(EvaluateError::EmptyCart);
    }
    if !input
        .discount
        .discount_classes
        .contains(&DiscountClass::Product)
    {
        return Ok(GenerateRunResult::empty());
    }

    let config = match resolve_configuration(&input.cart.lines, settings) {
        Some(config) => config,
        None => {
            debug!("no eligible configuration source in cart, no discounts apply");
            return Ok(GenerateRunResult::empty());
        }
    };

    let partition = partition_lines(&input.cart.lines);
    let quantity = eligible_quantity(&partition.ordinary, settings);
    // Any single flagged line flips pre-sale mode for the whole cart
    let presale_active = input.cart.lines.iter().any(CartLine::is_pre_sale);

    debug!(quantity, presale_active, "evaluating cart");

    let candidates = calculate_candidates(&partition, &config, quantity, presale_active, settings);
    if candidates.is_empty() {
        return Ok(GenerateRunResult::empty());
    }

    Ok(GenerateRunResult {
        operations: vec![Operation::ProductDiscountsAdd(ProductDiscountsAdd {
            candidates,
            selection_strategy: ProductSelectionStrategy::All,
        })],
    })
}

/// Sums quantities of ordinary, category-eligible, non-excluded lines.
/// This aggregate is the sole input to tier selection; bundle-member
/// quantities never count (P4).
pub fn eligible_quantity(ordinary: &[&CartLine], settings: &Settings) -> i64 {
    ordinary
        .iter()
        .filter(|line| {
            let product = line.product();
            product.product_type == settings.product_type
                && !settings.is_excluded_title(&product.title)
        })
        .map(|line| line.quantity)
        .sum()
}

/// Builds the combined candidate list: bundle candidates first, then
/// ordinary-line candidates, both in arrival order.
fn calculate_candidates(
    partition: &Partition<'_>,
    config: &PricingConfig,
    quantity: i64,
    presale_active: bool,
    settings: &Settings,
) -> Vec<Candidate> {
    // Resolve the active table up front. Its absence empties the whole
    // result, bundles included.
    let tier_row = match config.select_tier(quantity) {
        Some(tier) => match config.tier_row(&tier.name) {
            Some(row) => Some(row),
            None => {
                debug!(tier = %tier.name, "tier active but tiered table has no row for it");
                return vec![];
            }
        },
        None => {
            if config.normal_discounts.is_none() {
                debug!("no tier active and no normal discount table");
                return vec![];
            }
            None
        }
    };

    let bonus = if presale_active {
        config.presale_bonus_value()
    } else {
        0.0
    };

    let mut candidates = bundle_candidates(&partition.groups, presale_active, bonus, settings);

    for line in &partition.ordinary {
        if let Some(candidate) =
            line_candidate(line, config, tier_row, presale_active, bonus, settings)
        {
            candidates.push(candidate);
        }
    }

    candidates
}

/// Selects the discount for one ordinary line, or `None` when the line is
/// skipped (ineligible, unknown model, unknown type, non-positive value).
fn line_candidate(
    line: &CartLine,
    config: &PricingConfig,
    tier_row: Option<&TierDiscountRow>,
    presale_active: bool,
    bonus: f64,
    settings: &Settings,
) -> Option<Candidate> {
    let product = line.product();
    if settings.is_excluded_title(&product.title) {
        return None;
    }
    if product.product_type != settings.product_type {
        return None;
    }
    let model_code = settings.model_code(&product.title)?;

    let (message, value, kind) = match tier_row {
        Some(row) => {
            let base = row.discount_for(model_code)?;
            if presale_active {
                // Value carries base + bonus; the copy shows the base rate
                (
                    label::presale_tier_label(base),
                    base + bonus,
                    DiscountKind::Percentage,
                )
            } else {
                (
                    label::tier_label(settings, base),
                    base,
                    DiscountKind::Percentage,
                )
            }
        }
        None => {
            let rules = if presale_active {
                config.presale_discounts.as_deref()?
            } else {
                config.normal_discounts.as_deref()?
            };
            let rule = DiscountRule::find(rules, model_code)?;
            let kind = rule.kind()?;
            let value = rule.value()?;
            let message = if presale_active {
                label::presale_rule_label(settings, value, kind)
            } else {
                label::normal_rule_label(settings, value, kind)
            };
            (message, value, kind)
        }
    };

    // Zero or negative computed discounts are intentional suppression
    if value <= 0.0 {
        return None;
    }

    Some(Candidate {
        message,
        targets: vec![Target::cart_line(line.id.clone())],
        value: match kind {
            DiscountKind::Percentage => CandidateValue::percentage(value),
            DiscountKind::FixedAmount => CandidateValue::fixed_amount(value),
        },
    })
}

/// Emits one candidate per matched bundle member.
///
/// Matching consumes members from a per-group working copy so two cart lines
/// can never spend the same configured member (P5). The pre-sale path is
/// taken only when pre-sale mode is on AND the tier bonus is configured
/// non-zero; percentage values are clamped to 100 (P6).
fn bundle_candidates(
    groups: &[BundleGroup],
    presale_active: bool,
    bonus: f64,
    settings: &Settings,
) -> Vec<Candidate> {
    let presale_path = presale_active && bonus != 0.0;
    let category = if presale_path {
        LabelCategory::PreSaleBundle
    } else {
        LabelCategory::NormalBundle
    };

    let mut candidates = Vec::new();

    for group in groups {
        // Invocation-scoped working copy; discarded after this group
        let mut remaining = group.members.clone();

        for participant in &group.participants {
            let position = remaining.iter().position(|member| {
                member
                    .handle
                    .eq_ignore_ascii_case(&participant.product_handle)
            });
            let Some(position) = position else {
                debug!(
                    bundle = %group.handle,
                    product = %participant.product_handle,
                    "cart line matches no remaining bundle member"
                );
                continue;
            };
            let member = remaining.remove(position);

            let Some(kind) = member.kind() else {
                debug!(bundle = %group.handle, "bundle member has unknown discount type");
                continue;
            };
            let amount = if presale_path {
                member.pre_sale_amount_value()
            } else {
                member.amount_value()
            };
            let Some(mut amount) = amount else {
                debug!(bundle = %group.handle, "bundle member amount is not numeric");
                continue;
            };
            if kind == DiscountKind::Percentage && amount > 100.0 {
                amount = 100.0;
            }

            candidates.push(Candidate {
                message: label::bundle_label(category, settings),
                targets: vec![Target::cart_line(participant.line_id.clone())],
                value: match kind {
                    DiscountKind::Percentage => CandidateValue::percentage(amount),
                    DiscountKind::FixedAmount => CandidateValue::fixed_amount(amount),
                },
            });
        }
    }

    candidates
}

// =============================================================================
// Unit Tests
// =============================================================================
