//! Trolley Storefront library.
//!
//! The client-side half of the cart widget: a [`store::CartStore`] that keeps
//! the cart in a key-value store, and a [`binder::CartWidget`] that projects
//! it onto a [`page::Page`] and turns page events into store operations.
//!
//! # Architecture
//!
//! - `trolley-core` owns the cart state machine and pricing rules
//! - [`storage`] abstracts the local key-value store
//! - [`views`] renders markup with Askama templates
//! - [`page`] describes the page surface and ships a headless implementation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod binder;
pub mod config;
pub mod error;
mod filters;
pub mod page;
pub mod storage;
pub mod store;
pub mod views;

pub use binder::{CartWidget, UiEvent};
pub use error::{CartError, Result};
pub use page::{ElementIds, MemoryPage, Page};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::CartStore;
