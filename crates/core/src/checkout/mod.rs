//! Checkout
//!
//! Turns a cart and a filled-in checkout form into an [`OrderDraft`]:
//! validates the form, prices the order and snapshots the cart lines.

use decimal_percentage::Percentage;
use thiserror::Error;

use crate::{
    cart::Cart,
    money::{AmountError, percent_of_minor},
    orders::{Customer, DeliveryMethod, OrderDraft, PaymentMethod},
    users::UserUuid,
};

mod validation;

pub use validation::{Field, ValidationErrors};

/// Flat delivery fee, in minor units.
pub const DELIVERY_FEE: u64 = 3_99;

/// Sales tax rate as a fraction.
pub const TAX_RATE: f64 = 0.08;

/// Errors that stop a checkout before an order is created.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more form fields are missing.
    #[error("checkout form is invalid: {0}")]
    Invalid(#[from] ValidationErrors),

    /// Pricing arithmetic failed.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Tax and fee settings.
#[derive(Debug, Clone, Copy)]
pub struct Pricing {
    /// Tax rate applied to the subtotal
    pub tax_rate: Percentage,

    /// Fee charged for delivery orders, in minor units
    pub delivery_fee: u64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            tax_rate: Percentage::from(TAX_RATE),
            delivery_fee: DELIVERY_FEE,
        }
    }
}

impl Pricing {
    /// Prices a subtotal for the given delivery method.
    ///
    /// # Errors
    ///
    /// Returns an [`AmountError`] if tax or total cannot be represented.
    pub fn quote(&self, subtotal: u64, method: DeliveryMethod) -> Result<Quote, AmountError> {
        let tax = percent_of_minor(&self.tax_rate, subtotal)?;
        let delivery_fee = match method {
            DeliveryMethod::Delivery => self.delivery_fee,
            DeliveryMethod::Pickup => 0,
        };
        let total = subtotal
            .checked_add(tax)
            .and_then(|amount| amount.checked_add(delivery_fee))
            .ok_or(AmountError::Overflow)?;

        Ok(Quote {
            subtotal,
            tax,
            delivery_fee,
            total,
        })
    }
}

/// Priced order summary, all amounts in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Sum of line totals
    pub subtotal: u64,

    /// Tax on the subtotal
    pub tax: u64,

    /// Delivery fee, zero for pickup
    pub delivery_fee: u64,

    /// Amount due
    pub total: u64,
}

/// Checkout form as the customer filled it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Phone number
    pub phone: String,

    /// Street address, required for delivery
    pub address: String,

    /// City, required for delivery
    pub city: String,

    /// ZIP code, required for delivery
    pub zip_code: String,

    /// Delivery or pickup
    pub delivery_method: DeliveryMethod,

    /// Card or cash
    pub payment_method: PaymentMethod,

    /// Optional instructions for the driver
    pub delivery_instructions: String,
}

impl CheckoutForm {
    /// Checks that every required field is filled in. Address fields are only
    /// required for delivery orders.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any required field is blank.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.require(Field::FirstName, &self.first_name, "First name is required");
        errors.require(Field::LastName, &self.last_name, "Last name is required");
        errors.require(Field::Phone, &self.phone, "Phone number is required");

        if self.delivery_method == DeliveryMethod::Delivery {
            errors.require(Field::Address, &self.address, "Address is required");
            errors.require(Field::City, &self.city, "City is required");
            errors.require(Field::ZipCode, &self.zip_code, "ZIP code is required");
        }

        errors.into_result()
    }

    /// Contact details for the order. The address is only kept for delivery.
    pub fn customer(&self) -> Customer {
        let address = match self.delivery_method {
            DeliveryMethod::Delivery => format!(
                "{}, {}, {}",
                self.address.trim(),
                self.city.trim(),
                self.zip_code.trim()
            ),
            DeliveryMethod::Pickup => String::new(),
        };

        Customer {
            name: format!("{} {}", self.first_name.trim(), self.last_name.trim()),
            phone: self.phone.trim().to_string(),
            address,
        }
    }

    /// Delivery instructions, `None` when left blank.
    pub fn instructions(&self) -> Option<String> {
        let trimmed = self.delivery_instructions.trim();

        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Validates `form`, prices `cart` and builds the order draft for `user_id`.
/// The cart itself is left untouched.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: the cart has no lines.
/// - [`CheckoutError::Invalid`]: the form failed validation.
/// - [`CheckoutError::Amount`]: pricing overflowed.
pub fn draft_order(
    user_id: UserUuid,
    cart: &Cart,
    form: &CheckoutForm,
    pricing: &Pricing,
) -> Result<OrderDraft, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    form.validate()?;

    let quote = pricing.quote(cart.subtotal(), form.delivery_method)?;

    Ok(OrderDraft {
        user_id,
        lines: cart.snapshot(),
        subtotal: quote.subtotal,
        tax: quote.tax,
        delivery_fee: quote.delivery_fee,
        delivery_method: form.delivery_method,
        payment_method: form.payment_method,
        customer: form.customer(),
        delivery_instructions: form.instructions(),
    })
}
