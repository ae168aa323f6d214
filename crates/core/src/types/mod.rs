//! Core types for Trolley.
//!
//! This module provides type-safe wrappers for cart domain concepts.

pub mod line_item;
pub mod price;
pub mod product;
pub mod product_name;

pub use line_item::LineItem;
pub use price::{Money, Price, quantity_from_input, sanitize_amount};
pub use product::Product;
pub use product_name::{ProductName, ProductNameError};
