//! Type-safe price representation using decimal arithmetic.
//!
//! Prices reach the cart from page attributes, form inputs and stored JSON,
//! any of which may carry currency symbols, thousands separators or plain
//! garbage. [`sanitize_amount`] turns such text into a [`Decimal`] the way a
//! permissive float parser would, defaulting to zero instead of failing.

use core::fmt;
use core::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
/// A non-negative unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, clamping negative amounts to zero.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount.max(Decimal::ZERO))
    }

    /// Sanitize free-form text into a price.
    ///
    /// ```
    /// use trolley_core::Price;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Price::parse_lenient("$12.50").amount(), Decimal::new(125, 1));
    /// assert_eq!(Price::parse_lenient("n/a"), Price::ZERO);
    /// assert_eq!(Price::parse_lenient("-4"), Price::ZERO);
    /// ```
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        Self::new(sanitize_amount(raw))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

/// A display-ready money amount (e.g. `$19.99`).
///
/// Rounds half away from zero to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Money(Decimal);

impl Money {
    /// Wrap an amount for display.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The amount rounded to cents.
    #[must_use]
    pub fn cents(self) -> Decimal {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        rounded
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Money {
    fn from(price: Price) -> Self {
        Self(price.amount())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.cents())
    }
}

/// Turn free-form text into an amount, defaulting to zero.
///
/// Every character other than an ASCII digit, `.` or `-` is dropped, then the
/// longest leading `-?digits[.digits]` prefix is parsed. Text with no such
/// prefix (or one too large for a [`Decimal`]) yields zero.
#[must_use]
pub fn sanitize_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();

    numeric_prefix(&cleaned)
        .and_then(|prefix| Decimal::from_str(&prefix).ok())
        .unwrap_or(Decimal::ZERO)
}

/// Turn free-form text into a whole quantity, flooring fractions.
///
/// Values outside the `i64` range yield zero.
#[must_use]
pub fn quantity_from_input(raw: &str) -> i64 {
    sanitize_amount(raw).floor().to_i64().unwrap_or(0)
}

fn numeric_prefix(cleaned: &str) -> Option<String> {
    let mut chars = cleaned.chars().peekable();
    let negative = chars.next_if_eq(&'-').is_some();

    let mut whole = String::new();
    while let Some(digit) = chars.next_if(char::is_ascii_digit) {
        whole.push(digit);
    }

    let mut fraction = String::new();
    if chars.next_if_eq(&'.').is_some() {
        while let Some(digit) = chars.next_if(char::is_ascii_digit) {
            fraction.push(digit);
        }
    }

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut prefix = String::with_capacity(whole.len() + fraction.len() + 3);
    if negative {
        prefix.push('-');
    }
    if whole.is_empty() {
        prefix.push('0');
    } else {
        prefix.push_str(&whole);
    }
    if !fraction.is_empty() {
        prefix.push('.');
        prefix.push_str(&fraction);
    }
    Some(prefix)
}
