//! Orders

mod errors;
mod store;

pub use errors::OrdersError;
pub use store::OrderStore;
