//! Checkout service.

use pizzeria::{
    checkout::{CheckoutForm, Pricing, draft_order},
    orders::Order,
    users::User,
};
use tracing::{error, info};

use crate::{carts::CartStore, checkout::CheckoutServiceError, orders::OrderStore};

/// Turns the current cart into an order.
#[derive(Debug, Clone, Default)]
pub struct CheckoutService {
    pricing: Pricing,
}

impl CheckoutService {
    #[must_use]
    pub fn new(pricing: Pricing) -> Self {
        Self { pricing }
    }

    #[must_use]
    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    /// Validates `form`, snapshots the cart into a new order for `user` and
    /// empties the cart.
    ///
    /// The cart is only cleared once the order has been stored. If clearing
    /// then fails the order still stands and the failure is logged.
    ///
    /// # Errors
    ///
    /// - [`CheckoutServiceError::NotSignedIn`]: no user.
    /// - [`CheckoutServiceError::Checkout`]: empty cart, invalid form or pricing overflow.
    /// - [`CheckoutServiceError::Orders`]: the order could not be stored.
    pub fn submit(
        &self,
        user: Option<&User>,
        cart: &mut CartStore,
        orders: &mut OrderStore,
        form: &CheckoutForm,
    ) -> Result<Order, CheckoutServiceError> {
        let user = user.ok_or(CheckoutServiceError::NotSignedIn)?;
        let draft = draft_order(user.id, cart.cart(), form, &self.pricing)?;
        let order = orders.submit(draft)?;

        if let Err(clear_error) = cart.clear() {
            error!(
                order = %order.id,
                error = %clear_error,
                "order placed but cart was not cleared"
            );
        }

        info!(
            order = %order.id,
            items = order.total_items(),
            total = order.total,
            method = %order.delivery_method,
            "checkout complete"
        );

        Ok(order)
    }
}
