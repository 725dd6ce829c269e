//! Checkout service errors.

use pizzeria::checkout::CheckoutError;
use thiserror::Error;

use crate::orders::OrdersError;

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("sign in to place an order")]
    NotSignedIn,

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("failed to place order")]
    Orders(#[from] OrdersError),
}
