//! Fixed pricing rules: shipping, tax and the single promo code.

use rust_decimal::Decimal;

use crate::cart::Cart;

/// Flat shipping fee charged whenever the cart is not empty.
pub const SHIPPING_FEE: Decimal = Decimal::from_parts(1000, 0, 0, false, 2);

/// Tax rate applied to the subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(12, 0, 0, false, 2);

/// The only promo code the widget recognizes.
pub const PROMO_CODE: &str = "DISCOUNT10";

/// Share of the subtotal taken off by [`PROMO_CODE`].
pub const PROMO_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Order totals derived from a cart and a discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl Totals {
    /// Compute totals for `cart` with an externally supplied discount.
    ///
    /// Negative discounts count as zero. Amounts too large for a [`Decimal`]
    /// saturate instead of overflowing.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use trolley_core::{Cart, Totals};
    ///
    /// let totals = Totals::compute(&Cart::new(), Decimal::ZERO);
    /// assert_eq!(totals, Totals::default());
    /// ```
    #[must_use]
    pub fn compute(cart: &Cart, discount: Decimal) -> Self {
        let subtotal = cart.subtotal();
        let shipping = if cart.is_empty() {
            Decimal::ZERO
        } else {
            SHIPPING_FEE
        };
        let tax = subtotal.saturating_mul(TAX_RATE);
        let discount = discount.max(Decimal::ZERO);
        let total = subtotal
            .saturating_add(shipping)
            .saturating_add(tax)
            .saturating_sub(discount);

        Self {
            subtotal,
            shipping,
            tax,
            discount,
            total,
        }
    }
}

/// Result of submitting a promo code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoOutcome {
    /// The code matched; `discount` is the amount taken off.
    Applied { discount: Decimal },
    /// The code did not match; no discount applies.
    Rejected,
}

impl PromoOutcome {
    /// The discount to apply, zero when rejected.
    #[must_use]
    pub const fn discount(self) -> Decimal {
        match self {
            Self::Applied { discount } => discount,
            Self::Rejected => Decimal::ZERO,
        }
    }
}

/// Trim and uppercase a user-entered promo code.
#[must_use]
pub fn normalize_promo_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Check a promo code against [`PROMO_CODE`] for the given subtotal.
#[must_use]
pub fn apply_promo(code: &str, subtotal: Decimal) -> PromoOutcome {
    if normalize_promo_code(code) == PROMO_CODE {
        PromoOutcome::Applied {
            discount: subtotal.saturating_mul(PROMO_RATE),
        }
    } else {
        PromoOutcome::Rejected
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductName};

    fn cart_with(price: &str, quantity: i64) -> Cart {
        let mut cart = Cart::new();
        let name = ProductName::parse("Widget").unwrap();
        cart.add(name.clone(), Price::parse_lenient(price), "");
        cart.set_quantity(&name, quantity);
        cart
    }

    #[test]
    fn test_constants() {
        assert_eq!(SHIPPING_FEE, Decimal::from(10));
        assert_eq!(TAX_RATE, Decimal::new(12, 2));
        assert_eq!(PROMO_RATE, Decimal::new(1, 1));
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let totals = Totals::compute(&Cart::new(), Decimal::ZERO);
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_totals_without_discount() {
        let totals = Totals::compute(&cart_with("100", 2), Decimal::ZERO);
        assert_eq!(totals.subtotal, Decimal::from(200));
        assert_eq!(totals.shipping, Decimal::from(10));
        assert_eq!(totals.tax, Decimal::from(24));
        assert_eq!(totals.discount, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::from(234));
    }

    #[test]
    fn test_totals_with_discount() {
        let totals = Totals::compute(&cart_with("100", 2), Decimal::from(20));
        assert_eq!(totals.total, Decimal::from(214));
    }

    #[test]
    fn test_negative_discount_is_ignored() {
        let totals = Totals::compute(&cart_with("100", 1), Decimal::from(-5));
        assert_eq!(totals.discount, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::from(122));
    }

    #[test]
    fn test_compute_is_pure() {
        let cart = cart_with("19.99", 3);
        let first = Totals::compute(&cart, Decimal::ONE);
        let second = Totals::compute(&cart, Decimal::ONE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_huge_prices_saturate() {
        let cart = cart_with("50000000000000000000000000000", 2);
        let totals = Totals::compute(&cart, Decimal::ZERO);
        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.total, Decimal::MAX);
        assert!(totals.tax > Decimal::ZERO);

        let promo = apply_promo("DISCOUNT10", totals.subtotal);
        let discounted = Totals::compute(&cart, promo.discount());
        assert!(discounted.total < Decimal::MAX);
    }

    #[test]
    fn test_promo_code_normalization() {
        assert_eq!(
            apply_promo("  discount10 ", Decimal::from(200)),
            PromoOutcome::Applied {
                discount: Decimal::from(20)
            }
        );
        assert_eq!(apply_promo("DISCOUNT20", Decimal::from(200)), PromoOutcome::Rejected);
        assert_eq!(apply_promo("", Decimal::from(200)).discount(), Decimal::ZERO);
    }
}
