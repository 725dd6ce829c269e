//! Catalog
//!
//! Static product reference data. The built-in menu ships embedded in the
//! binary and is parsed once at start-up.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cart::NewCartLine, parse::ParseVariantError};

mod fixture;

pub use fixture::parse_price;

const BUILTIN_MENU: &str = include_str!("menu.yml");

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// YAML parsing error
    #[error("failed to parse menu YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("invalid price format: {0}")]
    InvalidPrice(String),

    /// Price in a currency other than the storefront currency
    #[error("unsupported currency code: {0}")]
    UnknownCurrency(String),

    /// Two products share an id
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),
}

/// Product identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Pizza size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    /// Small
    Small,

    /// Medium
    Medium,

    /// Large
    Large,
}

impl Size {
    /// Every size, smallest first.
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    /// Lowercase name used in storage and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseVariantError::new("size", s, "small, medium, large"))
    }
}

/// Per-size prices in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizePrices {
    /// Small price
    pub small: u64,

    /// Medium price
    pub medium: u64,

    /// Large price
    pub large: u64,
}

impl SizePrices {
    /// Price for the given size.
    pub const fn get(&self, size: Size) -> u64 {
        match size {
            Size::Small => self.small,
            Size::Medium => self.medium,
            Size::Large => self.large,
        }
    }
}

/// Menu category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Classic pizzas
    Classic,

    /// Specialty pizzas
    Specialty,

    /// Vegetarian pizzas
    Vegetarian,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 3] = [
        Category::Classic,
        Category::Specialty,
        Category::Vegetarian,
    ];

    /// Lowercase name used in storage and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Classic => "classic",
            Category::Specialty => "specialty",
            Category::Vegetarian => "vegetarian",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Category filter for menu searches; `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,

    /// A single category
    Only(Category),
}

impl CategoryFilter {
    /// Whether a product in `category` passes the filter.
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => only == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }

        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .map(CategoryFilter::Only)
            .ok_or_else(|| {
                ParseVariantError::new("category", s, "all, classic, specialty, vegetarian")
            })
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Menu description
    pub description: String,

    /// Image reference
    pub image_url: String,

    /// Per-size prices
    pub prices: SizePrices,

    /// Menu category
    pub category: Category,

    /// Toppings, in menu order
    pub toppings: Vec<String>,

    /// Featured on the home page
    pub is_popular: bool,
}

impl Product {
    /// Price for the given size, in minor units.
    pub const fn price(&self, size: Size) -> u64 {
        self.prices.get(size)
    }

    /// Builds the cart line payload for this product in the given size.
    pub fn line_for(&self, size: Size) -> NewCartLine {
        NewCartLine {
            product_id: self.id.clone(),
            name: self.name.clone(),
            size,
            unit_price: self.price(size),
            image_url: self.image_url.clone(),
        }
    }

    fn matches_term(&self, term: &str) -> bool {
        term.is_empty()
            || self.name.to_lowercase().contains(term)
            || self.description.to_lowercase().contains(term)
    }
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Loads the menu embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the embedded menu is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_MENU)
    }

    /// Parses a YAML menu.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the YAML cannot be parsed, a price is
    /// invalid, or two products share an id.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: fixture::MenuFixture = serde_norway::from_str(yaml)?;

        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Self::with_products(products)
    }

    /// Builds a catalog from already-parsed products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if two products share an id.
    pub fn with_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        Ok(Self { products, index })
    }

    /// All products, in menu order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index
            .get(id)
            .and_then(|&position| self.products.get(position))
    }

    /// Products flagged as popular, in menu order.
    pub fn popular(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.is_popular)
    }

    /// Case-insensitive search over name and description, restricted to a
    /// category. An empty term matches every product.
    pub fn search(&self, term: &str, category: CategoryFilter) -> Vec<&Product> {
        let term = term.trim().to_lowercase();

        self.products
            .iter()
            .filter(|product| category.matches(product.category))
            .filter(|product| product.matches_term(&term))
            .collect()
    }

    /// Number of products on the menu.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the menu has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn builtin_menu_has_ten_pizzas() -> TestResult {
        let catalog = Catalog::builtin()?;

        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.popular().count(), 4);

        Ok(())
    }

    #[test]
    fn get_returns_prices_in_minor_units() -> TestResult {
        let catalog = Catalog::builtin()?;

        let pepperoni = catalog.get(&ProductId::from("1")).ok_or("missing pepperoni")?;

        assert_eq!(pepperoni.name, "Pepperoni");
        assert_eq!(pepperoni.price(Size::Small), 9_99);
        assert_eq!(pepperoni.price(Size::Medium), 12_99);
        assert_eq!(pepperoni.price(Size::Large), 15_99);

        Ok(())
    }

    #[test]
    fn get_unknown_product_is_none() -> TestResult {
        let catalog = Catalog::builtin()?;

        assert!(catalog.get(&ProductId::from("99")).is_none());

        Ok(())
    }

    #[test]
    fn search_matches_description_case_insensitively() -> TestResult {
        let catalog = Catalog::builtin()?;

        let names: Vec<&str> = catalog
            .search("WHITE SAUCE", CategoryFilter::All)
            .into_iter()
            .map(|product| product.name.as_str())
            .collect();

        assert_eq!(names, ["Spinach & Feta", "Mushroom & Truffle"]);

        Ok(())
    }

    #[test]
    fn search_combines_term_and_category() -> TestResult {
        let catalog = Catalog::builtin()?;

        let results = catalog.search("chicken", CategoryFilter::Only(Category::Specialty));
        let vegetarian = catalog.search("chicken", CategoryFilter::Only(Category::Vegetarian));

        assert_eq!(results.len(), 2);
        assert!(vegetarian.is_empty());

        Ok(())
    }

    #[test]
    fn empty_search_lists_whole_category() -> TestResult {
        let catalog = Catalog::builtin()?;

        let classics = catalog.search("", CategoryFilter::Only(Category::Classic));

        assert_eq!(classics.len(), 2);

        Ok(())
    }

    #[test]
    fn line_for_uses_size_price() -> TestResult {
        let catalog = Catalog::builtin()?;
        let product = catalog.get(&ProductId::from("3")).ok_or("missing supreme")?;

        let line = product.line_for(Size::Large);

        assert_eq!(line.product_id, product.id);
        assert_eq!(line.unit_price, 17_99);
        assert_eq!(line.size, Size::Large);

        Ok(())
    }

    #[test]
    fn duplicate_ids_are_rejected() -> TestResult {
        let catalog = Catalog::builtin()?;
        let mut products = catalog.products().to_vec();
        products.extend(catalog.products().first().cloned());

        let result = Catalog::with_products(products);

        assert!(
            matches!(result, Err(CatalogError::DuplicateProduct(ref id)) if id.as_str() == "1"),
            "expected DuplicateProduct, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn category_filter_parses_all_and_categories() -> TestResult {
        assert_eq!("all".parse::<CategoryFilter>()?, CategoryFilter::All);
        assert_eq!(
            "Vegetarian".parse::<CategoryFilter>()?,
            CategoryFilter::Only(Category::Vegetarian)
        );
        assert!("dessert".parse::<CategoryFilter>().is_err());

        Ok(())
    }

    #[test]
    fn size_parses_case_insensitively() -> TestResult {
        assert_eq!("LARGE".parse::<Size>()?, Size::Large);
        assert!("family".parse::<Size>().is_err());

        Ok(())
    }
}
