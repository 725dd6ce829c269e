//! Cart
//!
//! An ordered collection of line items keyed by product and size. Adding an
//! item that is already in the cart bumps its quantity instead of adding a
//! second line, and totals are always derived from the current lines.

use serde::{Deserialize, Serialize};

use crate::catalog::{ProductId, Size};

/// Item payload used to add a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLine {
    /// Product id
    pub product_id: ProductId,

    /// Product name at the time it was added
    pub name: String,

    /// Chosen size
    pub size: Size,

    /// Unit price in minor units
    pub unit_price: u64,

    /// Image reference
    pub image_url: String,
}

/// A single cart or order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id
    pub product_id: ProductId,

    /// Product name
    pub name: String,

    /// Chosen size
    pub size: Size,

    /// Unit price in minor units
    pub unit_price: u64,

    /// Quantity, always at least one
    pub quantity: u32,

    /// Image reference
    pub image_url: String,
}

impl CartLine {
    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }

    fn is_keyed(&self, product_id: &ProductId, size: Size) -> bool {
        self.product_id == *product_id && self.size == size
    }
}

impl From<NewCartLine> for CartLine {
    fn from(item: NewCartLine) -> Self {
        Self {
            product_id: item.product_id,
            name: item.name,
            size: item.size,
            unit_price: item.unit_price,
            quantity: 1,
            image_url: item.image_url,
        }
    }
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from raw lines, merging lines that share a key and
    /// dropping lines with no quantity.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();

        for line in lines {
            if line.quantity == 0 {
                continue;
            }

            match cart.line_mut(&line.product_id, line.size) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }

        cart
    }

    /// Adds one unit of `item`, merging with an existing line of the same
    /// product and size.
    pub fn add_item(&mut self, item: NewCartLine) {
        match self.line_mut(&item.product_id, item.size) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::from(item)),
        }
    }

    /// Removes the line for `product_id` in `size`. Returns whether a line was
    /// removed; a missing line is not an error.
    pub fn remove_item(&mut self, product_id: &ProductId, size: Size) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| !line.is_keyed(product_id, size));

        self.lines.len() != before
    }

    /// Sets the quantity of a line. A quantity of zero or less removes the
    /// line. Returns whether a line was changed.
    pub fn update_quantity(&mut self, product_id: &ProductId, size: Size, quantity: i64) -> bool {
        let Ok(quantity) = u32::try_from(quantity.max(0)) else {
            return self.set_quantity(product_id, size, u32::MAX);
        };

        if quantity == 0 {
            return self.remove_item(product_id, size);
        }

        self.set_quantity(product_id, size, quantity)
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up the line for a product and size.
    pub fn line(&self, product_id: &ProductId, size: Size) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.is_keyed(product_id, size))
    }

    /// Deep copy of the current lines, e.g. for an order snapshot.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines.clone()
    }

    /// Sum of quantities over every line.
    pub fn total_items(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Sum of unit price times quantity over every line, in minor units.
    pub fn subtotal(&self) -> u64 {
        self.lines
            .iter()
            .fold(0, |total, line| total.saturating_add(line.line_total()))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: &ProductId, size: Size) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.is_keyed(product_id, size))
    }

    fn set_quantity(&mut self, product_id: &ProductId, size: Size, quantity: u32) -> bool {
        match self.line_mut(product_id, size) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
