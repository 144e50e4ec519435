//! Commerce error types.

use thiserror::Error;

/// Errors raised by client-side domain logic.
///
/// These never come from the network; the API's own failures are reported by
/// `grocer_data::ApiError`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Checkout attempted with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout is missing a required choice.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(&'static str),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Unknown value for an enumerated field.
    #[error("Unknown {field}: {value}")]
    UnknownValue { field: &'static str, value: String },
}
