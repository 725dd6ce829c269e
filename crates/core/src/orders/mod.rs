//! Orders
//!
//! An order is an immutable snapshot of a cart taken at checkout. Only its
//! status changes afterwards.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    cart::CartLine, money::AmountError, parse::ParseVariantError, users::UserUuid,
    uuids::TypedUuid,
};

pub mod query;
pub mod status;

pub use status::{OrderStatus, StatusStep, next_status};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// Delivered to the customer's address
    #[default]
    Delivery,

    /// Collected in store
    Pickup,
}

impl DeliveryMethod {
    /// Lowercase name used in storage and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            DeliveryMethod::Delivery => "delivery",
            DeliveryMethod::Pickup => "pickup",
        }
    }
}

impl Display for DeliveryMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMethod {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delivery" => Ok(DeliveryMethod::Delivery),
            "pickup" => Ok(DeliveryMethod::Pickup),
            _ => Err(ParseVariantError::new("delivery method", s, "delivery, pickup")),
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card on delivery or in store
    #[default]
    Card,

    /// Cash on delivery or in store
    Cash,
}

impl PaymentMethod {
    /// Lowercase name used in storage and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "cash" => Ok(PaymentMethod::Cash),
            _ => Err(ParseVariantError::new("payment method", s, "card, cash")),
        }
    }
}

/// Contact details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Customer {
    /// Full name
    pub name: String,

    /// Phone number
    pub phone: String,

    /// Delivery address; empty for pickup orders
    pub address: String,
}

/// An order before it has been assigned an id, status and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    /// Ordering user
    pub user_id: UserUuid,

    /// Copy of the cart lines
    pub lines: Vec<CartLine>,

    /// Sum of line totals, in minor units
    pub subtotal: u64,

    /// Tax, in minor units
    pub tax: u64,

    /// Delivery fee, in minor units
    pub delivery_fee: u64,

    /// Delivery or pickup
    pub delivery_method: DeliveryMethod,

    /// Card or cash
    pub payment_method: PaymentMethod,

    /// Contact details
    pub customer: Customer,

    /// Free-form instructions for the driver
    pub delivery_instructions: Option<String>,
}

impl OrderDraft {
    /// Subtotal plus tax plus delivery fee.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Overflow`] if the sum does not fit.
    pub fn total(&self) -> Result<u64, AmountError> {
        self.subtotal
            .checked_add(self.tax)
            .and_then(|amount| amount.checked_add(self.delivery_fee))
            .ok_or(AmountError::Overflow)
    }
}

/// Order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order id
    pub id: OrderUuid,

    /// Ordering user
    pub user_id: UserUuid,

    /// Lines as they were in the cart at checkout
    pub lines: Vec<CartLine>,

    /// Sum of line totals, in minor units
    pub subtotal: u64,

    /// Tax, in minor units
    pub tax: u64,

    /// Delivery fee, in minor units
    pub delivery_fee: u64,

    /// Fixed at creation: subtotal + tax + delivery fee
    pub total: u64,

    /// Delivery or pickup
    pub delivery_method: DeliveryMethod,

    /// Card or cash
    pub payment_method: PaymentMethod,

    /// Current lifecycle stage
    pub status: OrderStatus,

    /// Submission time
    pub created_at: Timestamp,

    /// Contact details
    pub customer: Customer,

    /// Free-form instructions for the driver
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_instructions: Option<String>,
}

impl Order {
    /// Finalizes a draft: assigns the id and timestamp, computes the total and
    /// starts the order at [`OrderStatus::Processing`].
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Overflow`] if the total does not fit.
    pub fn from_draft(
        id: OrderUuid,
        draft: OrderDraft,
        created_at: Timestamp,
    ) -> Result<Self, AmountError> {
        let total = draft.total()?;

        Ok(Self {
            id,
            user_id: draft.user_id,
            lines: draft.lines,
            subtotal: draft.subtotal,
            tax: draft.tax,
            delivery_fee: draft.delivery_fee,
            total,
            delivery_method: draft.delivery_method,
            payment_method: draft.payment_method,
            status: OrderStatus::Processing,
            created_at,
            customer: draft.customer,
            delivery_instructions: draft.delivery_instructions,
        })
    }

    /// Sum of quantities over every line.
    pub fn total_items(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }
}
