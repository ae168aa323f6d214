//! Cart line item type.

use rust_decimal::Decimal;

use super::{Price, ProductName};

/// One distinct product in the cart.
///
/// The quantity is always at least one; the [`Cart`](crate::Cart) removes an
/// item instead of storing it with a zero quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    name: ProductName,
    price: Price,
    image: String,
    quantity: u32,
}

impl LineItem {
    /// Create a line item with a quantity of one.
    #[must_use]
    pub fn new(name: ProductName, price: Price, image: impl Into<String>) -> Self {
        Self {
            name,
            price,
            image: image.into(),
            quantity: 1,
        }
    }

    /// Rebuild a line item from stored fields.
    ///
    /// Returns `None` for a zero quantity.
    #[must_use]
    pub fn restore(
        name: ProductName,
        price: Price,
        image: impl Into<String>,
        quantity: u32,
    ) -> Option<Self> {
        (quantity > 0).then(|| Self {
            name,
            price,
            image: image.into(),
            quantity,
        })
    }

    #[must_use]
    pub const fn name(&self) -> &ProductName {
        &self.name
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Image URL, empty when the product has none.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.amount().saturating_mul(Decimal::from(self.quantity))
    }

    pub(crate) const fn set_price(&mut self, price: Price) {
        self.price = price;
    }

    /// Only called with non-zero quantities.
    pub(crate) const fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn widget() -> ProductName {
        ProductName::parse("Widget").unwrap()
    }

    #[test]
    fn test_new_starts_at_one() {
        let item = LineItem::new(widget(), Price::parse_lenient("4.50"), "");
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.image(), "");
    }

    #[test]
    fn test_restore_rejects_zero_quantity() {
        assert!(LineItem::restore(widget(), Price::ZERO, "", 0).is_none());
        let item = LineItem::restore(widget(), Price::ZERO, "a.png", 3).unwrap();
        assert_eq!(item.quantity(), 3);
        assert_eq!(item.image(), "a.png");
    }

    #[test]
    fn test_line_total() {
        let item =
            LineItem::restore(widget(), Price::parse_lenient("2.25"), "", 4).unwrap();
        assert_eq!(item.line_total(), Decimal::from(9));
    }

    #[test]
    fn test_line_total_saturates() {
        let item = LineItem::restore(
            widget(),
            Price::parse_lenient("50000000000000000000000000000"),
            "",
            2,
        )
        .unwrap();
        assert_eq!(item.line_total(), Decimal::MAX);
    }
}
