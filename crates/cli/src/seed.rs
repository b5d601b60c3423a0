//! Opening inventory. Nothing persists between runs, so every session starts here.

use stockroom_core::DomainResult;
use stockroom_products::Product;

use crate::menu::Shop;

pub fn default_inventory() -> DomainResult<Vec<Product>> {
    Ok(vec![
        Product::new("MacBook Air M2", 1450.00, 100)?,
        Product::new("Bose QuietComfort Earbuds", 250.00, 500)?,
        Product::new("Google Pixel 7", 500.00, 250)?,
        // Out of stock, so it starts inactive.
        Product::new("Sony PlayStation 5", 499.99, 0)?,
    ])
}

/// Store stocked with [`default_inventory`], collecting notices for the menu.
pub fn default_store() -> DomainResult<Shop> {
    Ok(Shop::with_sink(default_inventory()?, Vec::new()))
}
