//! Store-layer errors.

use grocer_commerce::CommerceError;
use grocer_data::ApiError;
use thiserror::Error;

/// Why an order could not be placed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Please select a delivery address")]
    NoAddress,

    #[error("Please choose a payment method")]
    NoPaymentMethod,

    #[error("Please sign in to place an order")]
    SignedOut,

    #[error("{0}")]
    Invalid(#[from] CommerceError),

    #[error("{0}")]
    Api(#[from] ApiError),
}
