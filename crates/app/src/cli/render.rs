//! Table rendering for command output.

use std::io;

use jiff::{Timestamp, tz::TimeZone};
use pizzeria::{
    cart::{Cart, CartLine},
    catalog::Product,
    checkout::Quote,
    money::format_amount,
    orders::Order,
};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};

fn styled(builder: Builder, money_columns: std::ops::Range<usize>) -> String {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Columns::new(money_columns), Alignment::right());

    table.to_string()
}

pub(crate) fn menu_table(products: &[&Product]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Pizza", "Category", "Small", "Medium", "Large", ""]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.to_string(),
            format_amount(product.prices.small),
            format_amount(product.prices.medium),
            format_amount(product.prices.large),
            if product.is_popular { "popular" } else { "" }.to_string(),
        ]);
    }

    styled(builder, 3..6)
}

fn line_rows(builder: &mut Builder, lines: &[CartLine]) {
    builder.push_record(["ID", "Pizza", "Size", "Qty", "Unit", "Line total"]);

    for line in lines {
        builder.push_record([
            line.product_id.to_string(),
            line.name.clone(),
            line.size.to_string(),
            line.quantity.to_string(),
            format_amount(line.unit_price),
            format_amount(line.line_total()),
        ]);
    }
}

pub(crate) fn cart_table(cart: &Cart) -> String {
    let mut builder = Builder::default();

    line_rows(&mut builder, cart.lines());

    styled(builder, 3..6)
}

pub(crate) fn orders_table(orders: &[&Order]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Order", "Placed", "Customer", "Items", "Total", "Method", "Status"]);

    for order in orders {
        builder.push_record([
            order.id.to_string(),
            placed_at(order.created_at),
            order.customer.name.clone(),
            order.total_items().to_string(),
            format_amount(order.total),
            order.delivery_method.to_string(),
            order.status.to_string(),
        ]);
    }

    styled(builder, 3..5)
}

/// Writes one order: header, lines, totals and the status progress.
pub(crate) fn write_order(out: &mut impl io::Write, order: &Order) -> io::Result<()> {
    let mut builder = Builder::default();

    line_rows(&mut builder, &order.lines);

    writeln!(out, "Order {}", order.id)?;
    writeln!(out, "Placed {}", placed_at(order.created_at))?;
    writeln!(out, "Customer {} ({})", order.customer.name, order.customer.phone)?;

    if !order.customer.address.is_empty() {
        writeln!(out, "Address {}", order.customer.address)?;
    }

    if let Some(instructions) = &order.delivery_instructions {
        writeln!(out, "Instructions {instructions}")?;
    }

    writeln!(
        out,
        "{} / {}",
        order.delivery_method, order.payment_method
    )?;
    writeln!(out, "{}", styled(builder, 3..6))?;

    write_summary(
        out,
        &Quote {
            subtotal: order.subtotal,
            tax: order.tax,
            delivery_fee: order.delivery_fee,
            total: order.total,
        },
    )?;

    let progress = order
        .status
        .progress()
        .iter()
        .map(|step| {
            let mark = match (step.current, step.completed) {
                (true, _) => ">",
                (false, true) => "x",
                (false, false) => " ",
            };

            format!("[{mark}] {}", step.status)
        })
        .collect::<Vec<_>>()
        .join("  ");

    writeln!(out, "{progress}")
}

/// Writes subtotal, tax, delivery fee and total with the amounts right-aligned.
pub(crate) fn write_summary(out: &mut impl io::Write, quote: &Quote) -> io::Result<()> {
    let rows = [
        ("Subtotal:", format_amount(quote.subtotal)),
        ("Tax:", format_amount(quote.tax)),
        ("Delivery:", format_amount(quote.delivery_fee)),
        ("Total:", format_amount(quote.total)),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in rows {
        writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
    }

    Ok(())
}

fn placed_at(timestamp: Timestamp) -> String {
    timestamp
        .to_zoned(TimeZone::system())
        .strftime("%Y-%m-%d %H:%M")
        .to_string()
}

#[cfg(test)]
mod tests {
    use pizzeria::catalog::Catalog;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn menu_table_lists_every_pizza_with_prices() -> TestResult {
        let catalog = Catalog::builtin()?;
        let products: Vec<&Product> = catalog.products().iter().collect();

        let table = menu_table(&products);

        assert!(table.contains("Margherita"));
        assert!(table.contains("13.99"));
        assert_eq!(table.matches("popular").count(), 4);

        Ok(())
    }

    #[test]
    fn summary_aligns_amounts() -> TestResult {
        let mut out = Vec::new();

        write_summary(
            &mut out,
            &Quote {
                subtotal: 10_00,
                tax: 80,
                delivery_fee: 3_99,
                total: 14_79,
            },
        )?;

        let text = String::from_utf8(out)?;
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|line| line.len() == lines[0].len()));
        assert!(text.contains("$14.79"));

        Ok(())
    }
}
