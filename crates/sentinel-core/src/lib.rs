//! # sentinel-core: Pure Pricing-Rule Evaluator
//!
//! This crate is the **heart** of Coupon Sentinel. It prices a checkout
//! cart against merchant-configured discount rules as a pure function:
//! cart snapshot + configuration in, discount operations out.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     Coupon Sentinel Architecture                 │
//! │                                                                  │
//! │  ┌────────────────────────────────────────────────────────────┐ │
//! │  │                  Checkout Platform                         │ │
//! │  │   invokes the discount function with a cart snapshot       │ │
//! │  └────────────────────────────┬───────────────────────────────┘ │
//! │                               │ JSON                             │
//! │  ┌────────────────────────────▼───────────────────────────────┐ │
//! │  │                sentinel-host (binary)                      │ │
//! │  │        stdin → evaluator → stdout, nothing else            │ │
//! │  └────────────────────────────┬───────────────────────────────┘ │
//! │                               │                                  │
//! │  ┌────────────────────────────▼───────────────────────────────┐ │
//! │  │             ★ sentinel-core (THIS CRATE) ★                 │ │
//! │  │                                                            │ │
//! │  │   ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐  │ │
//! │  │   │ config │ │ bundle │ │evaluate│ │delivery│ │  lint  │  │ │
//! │  │   │resolver│ │ groups │ │ tiers  │ │shipping│ │advisory│  │ │
//! │  │   └────────┘ └────────┘ └────────┘ └────────┘ └────────┘  │ │
//! │  │                                                            │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS       │ │
//! │  └────────────────────────────────────────────────────────────┘ │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`settings`] - Evaluator knobs (category gate, model codes, kill switch)
//! - [`input`] / [`output`] - Platform wire shapes
//! - [`config`] - Configuration resolver and pricing-rule types
//! - [`bundle`] - Bundle partitioner
//! - [`evaluate`] - Cart-lines discount evaluation (the core state machine)
//! - [`delivery`] - Delivery discount companion
//! - [`label`] - Candidate message generation
//! - [`lint`] - Offline configuration lints
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: identical cart + configuration = identical
//!    discount selection and magnitudes on every call. The only sanctioned
//!    non-determinism is the cosmetic random suffix in bundle labels.
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here.
//! 3. **Per-item isolation**: a failure inside one line's or one bundle
//!    member's processing never prevents processing of the rest.
//! 4. **No shared mutable state**: global flags (pre-sale mode, active
//!    tier) are computed once per invocation and passed as plain values.
//!
//! ## Example Usage
//!
//! ```rust
//! use sentinel_core::{cart_lines_discounts_generate_run, CartInput, Settings};
//!
//! let input: CartInput = serde_json::from_str(r#"{
//!     "cart": { "lines": [{
//!         "id": "gid://shopify/CartLine/0",
//!         "quantity": 1,
//!         "merchandise": { "product": {
//!             "title": "Air Purifier 35i",
//!             "productType": "Air Purifier",
//!             "normalConfig": { "value":
//!                 "[{\"product\":\"35i\",\"discount\":\"10\",\"discount_type\":\"percentage\"}]" }
//!         }},
//!         "cost": { "subtotalAmount": { "amount": 269 } }
//!     }]},
//!     "discount": { "discountClasses": ["PRODUCT"] }
//! }"#).unwrap();
//!
//! let result = cart_lines_discounts_generate_run(&input, &Settings::default()).unwrap();
//! assert_eq!(result.operations.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bundle;
pub mod config;
pub mod delivery;
pub mod error;
pub mod evaluate;
pub mod input;
pub mod label;
pub mod lint;
pub mod output;
pub mod settings;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sentinel_core::Settings` instead of
// `use sentinel_core::settings::Settings`.

pub use delivery::cart_delivery_options_discounts_generate_run;
pub use error::{EvaluateError, EvaluateResult};
pub use evaluate::cart_lines_discounts_generate_run;
pub use input::{CartInput, DeliveryInput, DiscountClass};
pub use output::{GenerateRunResult, Operation};
pub use settings::Settings;
