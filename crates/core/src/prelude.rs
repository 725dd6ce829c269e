//! Pizzeria prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine, NewCartLine},
    catalog::{
        Catalog, CatalogError, Category, CategoryFilter, Product, ProductId, Size, SizePrices,
    },
    checkout::{
        CheckoutError, CheckoutForm, Field, Pricing, Quote, ValidationErrors, draft_order,
    },
    money::{AmountError, format_amount},
    orders::{
        Customer, DeliveryMethod, Order, OrderDraft, OrderStatus, OrderUuid, PaymentMethod,
        StatusStep, next_status,
        query::{OrderQuery, SortKey, StatusFilter, filter_by_status, search_orders, sort_orders},
    },
    parse::ParseVariantError,
    users::{User, UserUuid},
    uuids::TypedUuid,
};
