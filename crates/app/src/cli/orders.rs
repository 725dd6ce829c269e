//! `pizzeria orders`

use std::io;

use clap::{Args, Subcommand};
use pizzeria::orders::{
    OrderStatus, OrderUuid,
    query::{OrderQuery, SortKey, StatusFilter},
};

use crate::{
    cli::{CliError, render, require_admin, require_user},
    context::AppContext,
};

#[derive(Debug, Args)]
pub struct OrdersCommand {
    #[command(subcommand)]
    pub command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersSubcommand {
    /// Your order history, newest first
    Mine,

    /// Every order, filtered and sorted (admin)
    List(ListArgs),

    /// One order with its lines and progress
    Show {
        /// Order id
        id: OrderUuid,
    },

    /// Set the status of an order (admin)
    Status {
        /// Order id
        id: OrderUuid,

        /// New status (processing, preparing, ready, delivering, completed)
        status: OrderStatus,
    },

    /// Move an order to its next status (admin)
    Advance {
        /// Order id
        id: OrderUuid,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Status to show, or all
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// Text to look for in id, customer name, phone and address
    #[arg(long, default_value = "")]
    pub search: String,

    /// Sort order (newest, oldest, highest, lowest)
    #[arg(long, default_value = "newest")]
    pub sort: SortKey,
}

pub(super) fn run(
    command: OrdersSubcommand,
    ctx: &mut AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    match command {
        OrdersSubcommand::Mine => {
            let user = require_user(ctx)?;
            let orders = ctx.orders.list_for_user(user.id);

            if orders.is_empty() {
                writeln!(out, "You have no orders yet.")?;
            } else {
                writeln!(out, "{}", render::orders_table(&orders))?;
            }
        }
        OrdersSubcommand::List(ListArgs {
            status,
            search,
            sort,
        }) => {
            require_admin(ctx)?;

            let query = OrderQuery {
                status,
                search,
                sort,
            };
            let orders = query.apply(ctx.orders.list());

            writeln!(out, "{}", render::orders_table(&orders))?;
            writeln!(out, "{} of {} orders", orders.len(), ctx.orders.len())?;
        }
        OrdersSubcommand::Show { id } => {
            let user = require_user(ctx)?;

            let order = ctx
                .orders
                .get(id)
                .filter(|order| user.is_admin || order.user_id == user.id)
                .ok_or(CliError::OrderNotFound(id))?;

            render::write_order(out, order)?;
        }
        OrdersSubcommand::Status { id, status } => {
            require_admin(ctx)?;

            let order = ctx.orders.update_status(id, status)?;

            writeln!(out, "Order {} is now {}", order.id, order.status)?;
        }
        OrdersSubcommand::Advance { id } => {
            require_admin(ctx)?;

            let order = ctx.orders.advance(id)?;

            writeln!(out, "Order {} is now {}", order.id, order.status)?;
        }
    }

    Ok(())
}
