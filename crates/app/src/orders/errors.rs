//! Order store errors.

use pizzeria::{money::AmountError, orders::OrderUuid};
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum OrdersError {
    #[error("order {0} not found")]
    NotFound(OrderUuid),

    #[error("order {0} is already completed")]
    AlreadyCompleted(OrderUuid),

    #[error("failed to save orders")]
    Storage(#[from] StorageError),

    #[error("order amount error")]
    Amount(#[from] AmountError),
}
