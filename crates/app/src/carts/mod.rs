//! Carts

mod store;

pub use store::CartStore;
