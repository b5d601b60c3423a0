//! Products domain module.
//!
//! This crate contains the business rules for a sellable product, implemented
//! purely as deterministic domain logic (no IO, no printing, no storage).

pub mod product;

pub use product::{
    Activate, Buy, Deactivate, Product, ProductActivated, ProductCommand, ProductDeactivated,
    ProductEvent, ProductPurchased, Purchase, QuantitySet, SetQuantity,
};
