//! Catalog product type.

use super::{Price, ProductName};

/// A product shown in the grid, before it is added to any cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: ProductName,
    pub price: Price,
    /// Image URL, empty when the product has none.
    pub image: String,
}

impl Product {
    #[must_use]
    pub fn new(name: ProductName, price: Price, image: impl Into<String>) -> Self {
        Self {
            name,
            price,
            image: image.into(),
        }
    }
}
