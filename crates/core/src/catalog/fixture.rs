//! Menu fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Deserialize;

use crate::{
    catalog::{Category, CatalogError, Product, ProductId, SizePrices},
    money::CURRENCY,
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub(super) struct MenuFixture {
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub(super) struct ProductFixture {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub prices: PricesFixture,
    pub category: Category,
    #[serde(default)]
    pub toppings: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
}

/// Per-size prices (e.g., "9.99 USD")
#[derive(Debug, Deserialize)]
pub(super) struct PricesFixture {
    pub small: String,
    pub medium: String,
    pub large: String,
}

impl TryFrom<ProductFixture> for Product {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let prices = SizePrices {
            small: parse_price(&fixture.prices.small)?,
            medium: parse_price(&fixture.prices.medium)?,
            large: parse_price(&fixture.prices.large)?,
        };

        Ok(Product {
            id: ProductId::new(fixture.id),
            name: fixture.name,
            description: fixture.description,
            image_url: fixture.image_url,
            prices,
            category: fixture.category,
            toppings: fixture.toppings,
            is_popular: fixture.is_popular,
        })
    }
}

/// Parse price string (e.g., "9.99 USD") into minor units of the storefront
/// currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, or if the currency is not
/// the storefront currency.
pub fn parse_price(s: &str) -> Result<u64, CatalogError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    if currency_code != CURRENCY.iso_alpha_code {
        return Err(CatalogError::UnknownCurrency(currency_code.to_string()));
    }

    amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_u64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))
}
