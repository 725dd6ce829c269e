//! `pizzeria checkout`

use std::io;

use clap::Args;
use pizzeria::{
    checkout::CheckoutForm,
    orders::{DeliveryMethod, PaymentMethod},
};

use crate::{
    cli::{CliError, render},
    context::AppContext,
};

/// Contact and delivery details. Address, city and ZIP code are only needed
/// for delivery.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// First name
    #[arg(long, default_value = "")]
    pub first_name: String,

    /// Last name
    #[arg(long, default_value = "")]
    pub last_name: String,

    /// Phone number
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Street address
    #[arg(long, default_value = "")]
    pub address: String,

    /// City
    #[arg(long, default_value = "")]
    pub city: String,

    /// ZIP code
    #[arg(long, default_value = "")]
    pub zip_code: String,

    /// Delivery method (delivery, pickup)
    #[arg(long, default_value = "delivery")]
    pub delivery: DeliveryMethod,

    /// Payment method (card, cash)
    #[arg(long, default_value = "card")]
    pub payment: PaymentMethod,

    /// Instructions for the driver
    #[arg(long, default_value = "")]
    pub instructions: String,
}

impl From<CheckoutArgs> for CheckoutForm {
    fn from(args: CheckoutArgs) -> Self {
        CheckoutForm {
            first_name: args.first_name,
            last_name: args.last_name,
            phone: args.phone,
            address: args.address,
            city: args.city,
            zip_code: args.zip_code,
            delivery_method: args.delivery,
            payment_method: args.payment,
            delivery_instructions: args.instructions,
        }
    }
}

pub(super) fn run(
    args: CheckoutArgs,
    ctx: &mut AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let user = ctx.current_user();
    let form = CheckoutForm::from(args);

    let order = ctx
        .checkout
        .submit(user.as_ref(), &mut ctx.cart, &mut ctx.orders, &form)?;

    writeln!(out, "Thank you! Your order has been placed.")?;
    render::write_order(out, &order)?;

    Ok(())
}
