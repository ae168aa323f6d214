//! The cart state machine.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s, unique by [`ProductName`],
//! where every quantity is at least one. Each mutation reports what it did as
//! a [`CartChange`] so callers can persist, refresh counters and notify the
//! shopper without the cart knowing about any of them.

use rust_decimal::Decimal;

use crate::types::{LineItem, Price, ProductName};

/// The observable outcome of a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A product was added, or its quantity bumped by one.
    Added { name: ProductName, quantity: u32 },
    /// A line item was removed.
    Removed { name: ProductName },
    /// A line item's quantity was overwritten.
    QuantityChanged { name: ProductName, quantity: u32 },
    /// Every line item was removed.
    Cleared,
    /// Nothing matched, so nothing changed.
    Unchanged,
}

impl CartChange {
    /// Whether the mutation altered the cart.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// An ordered, name-unique collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a cart from previously stored items.
    ///
    /// Items repeating an earlier name are folded into it: quantities add up
    /// and the later price wins.
    #[must_use]
    pub fn restore(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            match cart.position(item.name()) {
                Some(index) => {
                    if let Some(existing) = cart.items.get_mut(index) {
                        let quantity = existing.quantity().saturating_add(item.quantity());
                        existing.set_quantity(quantity);
                        existing.set_price(item.price());
                    }
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Add one unit of a product.
    ///
    /// An existing line item gains one unit and takes the new price (its image
    /// is kept). Otherwise a new item is appended with a quantity of one.
    pub fn add(&mut self, name: ProductName, price: Price, image: &str) -> CartChange {
        if let Some(existing) = self.items.iter_mut().find(|item| item.name() == &name) {
            let quantity = existing.quantity().saturating_add(1);
            existing.set_quantity(quantity);
            existing.set_price(price);
            return CartChange::Added { name, quantity };
        }

        self.items.push(LineItem::new(name.clone(), price, image));
        CartChange::Added { name, quantity: 1 }
    }

    /// Remove every line item with this name.
    pub fn remove(&mut self, name: &ProductName) -> CartChange {
        let before = self.items.len();
        self.items.retain(|item| item.name() != name);
        if self.items.len() == before {
            CartChange::Unchanged
        } else {
            CartChange::Removed { name: name.clone() }
        }
    }

    /// Overwrite a line item's quantity.
    ///
    /// Negative requests count as zero, and zero removes the item. Unknown
    /// names leave the cart untouched.
    pub fn set_quantity(&mut self, name: &ProductName, requested: i64) -> CartChange {
        let Some(index) = self.position(name) else {
            return CartChange::Unchanged;
        };

        let quantity = u32::try_from(requested.max(0)).unwrap_or(u32::MAX);
        if quantity == 0 {
            self.items.remove(index);
            return CartChange::Removed { name: name.clone() };
        }

        if let Some(item) = self.items.get_mut(index) {
            item.set_quantity(quantity);
        }
        CartChange::QuantityChanged {
            name: name.clone(),
            quantity,
        }
    }

    /// Remove every line item.
    pub fn clear(&mut self) -> CartChange {
        self.items.clear();
        CartChange::Cleared
    }

    /// Look up a line item by name.
    #[must_use]
    pub fn get(&self, name: &ProductName) -> Option<&LineItem> {
        self.items.iter().find(|item| item.name() == name)
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities, as shown on the cart badge.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Sum of every line total, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    fn position(&self, name: &ProductName) -> Option<usize> {
        self.items.iter().position(|item| item.name() == name)
    }
}
