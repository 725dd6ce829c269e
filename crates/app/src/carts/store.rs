//! Cart store.

use std::{fmt, sync::Arc};

use pizzeria::{
    cart::{Cart, NewCartLine},
    catalog::{ProductId, Size},
};
use tracing::{debug, info};

use crate::storage::{CART_KEY, KeyValueStore, StorageError, load_json, save_json};

/// The shopper's cart, written back to storage after every change.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn KeyValueStore>,
}

impl CartStore {
    /// Restores the cart saved under [`CART_KEY`], or starts empty.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let cart: Cart = load_json(storage.as_ref(), CART_KEY).unwrap_or_default();

        debug!(lines = cart.len(), "loaded cart");

        Self { cart, storage }
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.cart.subtotal()
    }

    /// Adds one of `item`, merging with an existing line of the same product and size.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be saved; the cart is left unchanged.
    pub fn add_item(&mut self, item: NewCartLine) -> Result<(), StorageError> {
        info!(product = %item.product_id, size = %item.size, "adding to cart");

        self.apply(|cart| cart.add_item(item))
    }

    /// Adds `quantity` of `item` as a single change and a single write.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be saved; the cart is left unchanged.
    pub fn add_items(&mut self, item: NewCartLine, quantity: u32) -> Result<(), StorageError> {
        if quantity == 0 {
            return Ok(());
        }

        info!(product = %item.product_id, size = %item.size, quantity, "adding to cart");

        self.apply(|cart| {
            let (product_id, size) = (item.product_id.clone(), item.size);

            cart.add_item(item);

            if let Some(current) = cart.line(&product_id, size).map(|line| line.quantity) {
                let target = i64::from(current) + i64::from(quantity) - 1;

                cart.update_quantity(&product_id, size, target);
            }
        })
    }

    /// Removes the line for `product_id` in `size`. Returns whether a line was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be saved; the cart is left unchanged.
    pub fn remove_item(
        &mut self,
        product_id: &ProductId,
        size: Size,
    ) -> Result<bool, StorageError> {
        self.apply(|cart| cart.remove_item(product_id, size))
    }

    /// Sets the quantity of a line; zero or less removes it. Returns whether a
    /// line matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be saved; the cart is left unchanged.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        size: Size,
        quantity: i64,
    ) -> Result<bool, StorageError> {
        self.apply(|cart| cart.update_quantity(product_id, size, quantity))
    }

    /// Empties the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be saved; the cart is left unchanged.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.apply(Cart::clear)
    }

    fn apply<R>(&mut self, mutate: impl FnOnce(&mut Cart) -> R) -> Result<R, StorageError> {
        let previous = self.cart.clone();
        let outcome = mutate(&mut self.cart);

        if let Err(error) = save_json(self.storage.as_ref(), CART_KEY, &self.cart) {
            self.cart = previous;

            return Err(error);
        }

        Ok(outcome)
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}
