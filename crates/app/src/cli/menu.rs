//! `pizzeria menu`

use std::io;

use clap::Args;
use pizzeria::catalog::{CategoryFilter, Product};

use crate::{
    cli::{CliError, render},
    context::AppContext,
};

#[derive(Debug, Args)]
pub struct MenuArgs {
    /// Text to look for in names and descriptions
    #[arg(long, default_value = "")]
    pub search: String,

    /// Category (all, classic, specialty, vegetarian)
    #[arg(long, default_value = "all")]
    pub category: CategoryFilter,

    /// Only show popular pizzas
    #[arg(long)]
    pub popular: bool,
}

pub(super) fn run(
    args: &MenuArgs,
    ctx: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let products: Vec<&Product> = ctx
        .catalog
        .search(&args.search, args.category)
        .into_iter()
        .filter(|product| !args.popular || product.is_popular)
        .collect();

    if products.is_empty() {
        writeln!(out, "No pizzas match your search.")?;

        return Ok(());
    }

    writeln!(out, "{}", render::menu_table(&products))?;

    Ok(())
}
