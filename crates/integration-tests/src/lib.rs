//! Integration tests for Trolley.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p trolley-integration-tests
//!
//! # More property cases
//! TROLLEY_PROPTEST_CASES=1024 cargo test -p trolley-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Store and widget flows on a headless storefront page
//! - `cart_property_test` - Properties of the store over generated inputs

#![cfg_attr(not(test), forbid(unsafe_code))]

use trolley_storefront::store::DEFAULT_STORAGE_KEY;
use trolley_storefront::{CartStore, CartWidget, ElementIds, MemoryPage, MemoryStore};

/// A wired widget on a fresh storefront page with an empty in-memory store.
#[must_use]
pub fn storefront() -> (CartWidget<MemoryStore>, MemoryPage, ElementIds) {
    storefront_with(MemoryStore::new())
}

/// A wired widget on a fresh storefront page over `storage`.
#[must_use]
pub fn storefront_with(storage: MemoryStore) -> (CartWidget<MemoryStore>, MemoryPage, ElementIds) {
    let ids = ElementIds::default();
    let mut page = MemoryPage::storefront(&ids);
    let store = CartStore::open(storage, DEFAULT_STORAGE_KEY);
    let mut widget = CartWidget::mount(&mut page, store, &ids);
    widget.wire(&mut page);
    (widget, page, ids)
}

/// An empty store over in-memory storage.
#[must_use]
pub fn empty_store() -> CartStore<MemoryStore> {
    CartStore::open(MemoryStore::new(), DEFAULT_STORAGE_KEY)
}
