//! The cart store: a [`Cart`] kept in sync with a [`KeyValueStore`].
//!
//! Every mutation is applied to the in-memory cart and written back
//! immediately. Reads never fail: a missing, unparsable or non-list value
//! loads as an empty cart, and individual records are sanitized rather than
//! rejected. Writes never fail either; storage errors are logged and the
//! in-memory cart stays authoritative for the rest of the session.
//!
//! # Storage format
//!
//! ```json
//! [{"name": "Widget", "price": 12.5, "image": "img.png", "quantity": 2}]
//! ```
//!
//! Prices are written with their exact decimal digits and numbers are read
//! back as numbers, so any price survives a save and load unchanged. Older
//! values using `img` instead of `image`, or carrying prices and quantities
//! as strings, are accepted on load.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::instrument;
use trolley_core::{
    Cart, CartChange, LineItem, Price, ProductName, Totals, quantity_from_input, sanitize_amount,
};

use crate::error::Result;
use crate::storage::KeyValueStore;

/// Storage key holding the serialized cart.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Stored representation of one line item.
#[derive(Debug, Serialize)]
struct StoredItem<'a> {
    name: &'a str,
    #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision::serialize")]
    price: Decimal,
    image: &'a str,
    quantity: u32,
}

/// Permissive shape used when reading stored line items back.
#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    price: Value,
    #[serde(default, alias = "img")]
    image: Option<String>,
    #[serde(default)]
    quantity: Value,
}

/// A cart backed by a key-value store.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    cart: Cart,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open the cart stored under `key`, loading whatever is there.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            cart: Cart::new(),
        };
        store.load();
        store
    }

    /// Replace the in-memory cart with the stored one.
    ///
    /// Absent or malformed values load as an empty cart.
    pub fn load(&mut self) {
        self.cart = match self.storage.get(&self.key) {
            Ok(Some(raw)) => decode_cart(&raw),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read stored cart");
                Cart::new()
            }
        };
        tracing::debug!(
            key = %self.key,
            items = self.cart.len(),
            "Cart loaded"
        );
    }

    /// Write the cart to storage. Failures are logged and otherwise ignored.
    pub fn save(&mut self) {
        let encoded = match encode_cart(&self.cart) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.key, &encoded) {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }

    /// Add one unit of a product.
    ///
    /// The name is trimmed and the price sanitized (unparsable prices become
    /// zero). An existing line item gains one unit and takes the new price.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidName` if the name is blank; the cart is not
    /// touched in that case.
    #[instrument(skip(self))]
    pub fn add_item(&mut self, name: &str, price: &str, image: &str) -> Result<CartChange> {
        let name = ProductName::parse(name)?;
        let change = self.cart.add(name, Price::parse_lenient(price), image);
        self.save();
        tracing::debug!(?change, "Item added");
        Ok(change)
    }

    /// Remove every line item with this name.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, name: &str) -> CartChange {
        let change = match ProductName::parse(name) {
            Ok(name) => self.cart.remove(&name),
            Err(_) => CartChange::Unchanged,
        };
        self.save();
        tracing::debug!(?change, "Item removed");
        change
    }

    /// Set a line item's quantity; zero or less removes it.
    #[instrument(skip(self))]
    pub fn change_quantity(&mut self, name: &str, requested: i64) -> CartChange {
        let change = match ProductName::parse(name) {
            Ok(name) => self.cart.set_quantity(&name, requested),
            Err(_) => CartChange::Unchanged,
        };
        self.save();
        tracing::debug!(?change, "Quantity changed");
        change
    }

    /// Add one unit to an existing line item.
    pub fn increment(&mut self, name: &str) -> CartChange {
        let requested = self.quantity_of(name).map_or(0, |q| i64::from(q) + 1);
        self.change_quantity(name, requested)
    }

    /// Take one unit off an existing line item, removing it at zero.
    pub fn decrement(&mut self, name: &str) -> CartChange {
        let requested = self.quantity_of(name).map_or(0, |q| i64::from(q) - 1);
        self.change_quantity(name, requested)
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> CartChange {
        let change = self.cart.clear();
        self.save();
        change
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.cart.total_quantity()
    }

    /// Totals for the current cart with the given discount. Does not mutate.
    #[must_use]
    pub fn compute_totals(&self, discount: Decimal) -> Totals {
        Totals::compute(&self.cart, discount)
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    /// The underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn quantity_of(&self, name: &str) -> Option<u32> {
        let name = ProductName::parse(name).ok()?;
        self.cart.get(&name).map(LineItem::quantity)
    }
}

fn encode_cart(cart: &Cart) -> serde_json::Result<String> {
    let items: Vec<StoredItem<'_>> = cart
        .items()
        .iter()
        .map(|item| StoredItem {
            name: item.name().as_str(),
            price: item.price().amount().normalize(),
            image: item.image(),
            quantity: item.quantity(),
        })
        .collect();
    serde_json::to_string(&items)
}

fn decode_cart(raw: &str) -> Cart {
    let Ok(Value::Array(records)) = serde_json::from_str::<Value>(raw) else {
        tracing::warn!("Stored cart is not a list, starting empty");
        return Cart::new();
    };

    Cart::restore(records.into_iter().filter_map(decode_item))
}

fn decode_item(record: Value) -> Option<LineItem> {
    let raw: RawItem = serde_json::from_value(record).ok()?;
    let name = ProductName::parse(raw.name.as_deref()?).ok()?;
    let price = Price::new(stored_amount(&raw.price));
    let quantity = match &raw.quantity {
        Value::String(s) => quantity_from_input(s),
        other => stored_amount(other).floor().to_i64().unwrap_or(0),
    };
    let quantity = u32::try_from(quantity).ok()?;
    LineItem::restore(name, price, raw.image.unwrap_or_default(), quantity)
}

/// Numbers are taken as written, exponent included; strings are sanitized.
fn stored_amount(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => number_amount(n),
        Value::String(s) => sanitize_amount(s),
        _ => Decimal::ZERO,
    }
}

fn number_amount(n: &Number) -> Decimal {
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .unwrap_or(Decimal::ZERO)
}
