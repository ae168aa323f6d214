//! Trolley Core - cart state machine and shared types.
//!
//! This crate provides the pure parts of the Trolley cart widget, shared by:
//! - `storefront` - Cart store persistence and the presentation binder
//! - `cli` - Command-line host driving the widget against a file store
//!
//! # Architecture
//!
//! The core crate contains only types and state transitions - no I/O, no
//! storage access, no rendering. Everything here can be exercised without a
//! page or a key-value store.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product names, prices and line items
//! - [`cart`] - The ordered, name-unique cart and its mutations
//! - [`pricing`] - Fixed pricing constants, derived totals and promo codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod pricing;
pub mod types;

pub use cart::{Cart, CartChange};
pub use pricing::{PromoOutcome, Totals};
pub use types::*;
