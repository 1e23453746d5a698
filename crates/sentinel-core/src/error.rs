//! # Error Types
//!
//! Domain errors for the pricing evaluator.
//!
//! Only fatal preconditions surface as errors. Everything that can go wrong
//! inside one line's or one bundle member's processing (bad JSON field,
//! unmatched model code, unknown discount type, non-positive value) is a
//! soft skip: the item is excluded from the output and evaluation continues.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. The error message is what the invoking platform records for a failed
//!    discount computation

use thiserror::Error;

/// Fatal evaluation preconditions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluateError {
    /// The cart snapshot carried no lines at all. The platform contract
    /// guarantees at least one line per invocation, so an empty cart is a
    /// caller bug and aborts the call rather than pricing nothing silently.
    #[error("No cart lines found")]
    EmptyCart,

    /// The delivery companion received a cart with no delivery groups.
    #[error("No delivery groups found")]
    NoDeliveryGroups,
}

/// Convenience type alias for Results with EvaluateError.
pub type EvaluateResult<T> = Result<T, EvaluateError>;

// =============================================================================
// Unit Tests
// =============================================================================
