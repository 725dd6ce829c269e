//! Pizzeria
//!
//! Storefront domain for a pizza shop: the menu, the shopping cart, checkout
//! pricing and validation, and the order lifecycle with the queries used to
//! browse it. Everything here is pure and synchronous; persistence and
//! authentication live in `pizzeria-app`.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod money;
pub mod orders;
pub mod parse;
pub mod prelude;
pub mod users;
pub mod uuids;
