//! `pizzeria cart`

use std::io;

use clap::{Args, Subcommand};
use pizzeria::{
    catalog::{ProductId, Size},
    orders::DeliveryMethod,
};
use tracing::warn;

use crate::{
    cli::{CliError, render},
    context::AppContext,
};

#[derive(Debug, Args)]
pub struct CartCommand {
    #[command(subcommand)]
    pub command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum CartSubcommand {
    /// Show the cart and what it would cost delivered
    Show,

    /// Add pizzas to the cart
    Add(AddArgs),

    /// Remove a line from the cart
    Remove(LineArgs),

    /// Set the quantity of a line; zero or less removes it
    Set(SetArgs),

    /// Empty the cart
    Clear,
}

/// A cart line: product and size.
#[derive(Debug, Args)]
pub struct LineArgs {
    /// Product id, as shown by `pizzeria menu`
    pub product: ProductId,

    /// Size (small, medium, large)
    #[arg(long, default_value = "medium")]
    pub size: Size,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub line: LineArgs,

    /// How many to add
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub quantity: u32,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    #[command(flatten)]
    pub line: LineArgs,

    /// New quantity
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

pub(super) fn run(
    command: CartSubcommand,
    ctx: &mut AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    match command {
        CartSubcommand::Show => show(ctx, out),
        CartSubcommand::Add(AddArgs { line, quantity }) => {
            let product = ctx
                .catalog
                .get(&line.product)
                .ok_or_else(|| CliError::UnknownProduct(line.product.to_string()))?;

            ctx.cart.add_items(product.line_for(line.size), quantity)?;

            writeln!(
                out,
                "Added {quantity} x {} {} ({} in cart)",
                line.size,
                product.name,
                ctx.cart.total_items()
            )?;

            Ok(())
        }
        CartSubcommand::Remove(line) => {
            if ctx.cart.remove_item(&line.product, line.size)? {
                writeln!(out, "Removed {} {} from the cart", line.size, line.product)?;
            } else {
                warn!(product = %line.product, size = %line.size, "no such cart line");
                writeln!(out, "No {} {} in the cart", line.size, line.product)?;
            }

            Ok(())
        }
        CartSubcommand::Set(SetArgs { line, quantity }) => {
            if ctx
                .cart
                .update_quantity(&line.product, line.size, quantity)?
            {
                show(ctx, out)
            } else {
                writeln!(out, "No {} {} in the cart", line.size, line.product)?;

                Ok(())
            }
        }
        CartSubcommand::Clear => {
            ctx.cart.clear()?;
            writeln!(out, "Cart cleared")?;

            Ok(())
        }
    }
}

fn show(ctx: &AppContext, out: &mut impl io::Write) -> Result<(), CliError> {
    let cart = ctx.cart.cart();

    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    let quote = ctx
        .checkout
        .pricing()
        .quote(cart.subtotal(), DeliveryMethod::Delivery)?;

    writeln!(out, "{}", render::cart_table(cart))?;
    writeln!(out, "{} items", cart.total_items())?;
    render::write_summary(out, &quote)?;

    Ok(())
}
