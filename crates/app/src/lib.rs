//! Storefront services: persistence, the cart and order stores,
//! authentication, checkout and the wiring that ties them together.

pub mod auth;
pub mod carts;
pub mod checkout;
pub mod cli;
pub mod config;
pub mod context;
pub mod observability;
pub mod orders;
pub mod storage;

#[cfg(test)]
mod test;
