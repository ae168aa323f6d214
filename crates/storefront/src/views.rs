//! Askama views for the product grid and the checkout panel.
//!
//! Templates receive plain view structs built from core types. Askama
//! escapes every interpolated value, so product names and image URLs typed
//! by shoppers cannot inject markup.

use askama::Template;
use trolley_core::{LineItem, Money, Product, Totals};

use crate::error::Result;
use crate::filters;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name().to_string(),
            image: item.image().to_owned(),
            quantity: item.quantity(),
            unit_price: item.price().into(),
            line_total: item.line_total().into(),
        }
    }
}

/// Totals display data, one formatted string per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsView {
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub discount: String,
    pub total: String,
}

impl From<&Totals> for TotalsView {
    fn from(totals: &Totals) -> Self {
        Self {
            subtotal: Money::new(totals.subtotal).to_string(),
            shipping: Money::new(totals.shipping).to_string(),
            tax: Money::new(totals.tax).to_string(),
            discount: Money::new(totals.discount).to_string(),
            total: Money::new(totals.total).to_string(),
        }
    }
}

/// Checkout panel rows.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub items: Vec<CartItemView>,
}

impl CartItemsTemplate {
    #[must_use]
    pub fn new(items: &[LineItem]) -> Self {
        Self {
            items: items.iter().map(CartItemView::from).collect(),
        }
    }
}

/// One card in the product grid.
#[derive(Template)]
#[template(path = "partials/product_card.html")]
pub struct ProductCardTemplate {
    pub name: String,
    pub price: Money,
    pub image: String,
}

impl From<&Product> for ProductCardTemplate {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.to_string(),
            price: product.price.into(),
            image: product.image.clone(),
        }
    }
}

/// Render the checkout rows for `items`.
///
/// # Errors
///
/// Returns `CartError::Render` if the template fails.
pub fn render_cart_items(items: &[LineItem]) -> Result<String> {
    Ok(CartItemsTemplate::new(items).render()?)
}

/// Render a product card.
///
/// # Errors
///
/// Returns `CartError::Render` if the template fails.
pub fn render_product_card(product: &Product) -> Result<String> {
    Ok(ProductCardTemplate::from(product).render()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use trolley_core::{Price, ProductName};

    use super::*;
    use crate::filters::PLACEHOLDER_IMAGE;

    fn item(name: &str, price: &str, image: &str, quantity: u32) -> LineItem {
        LineItem::restore(
            ProductName::parse(name).unwrap(),
            Price::parse_lenient(price),
            image,
            quantity,
        )
        .unwrap()
    }

    #[test]
    fn test_cart_items_render_rows() {
        let html = render_cart_items(&[item("Widget", "12.5", "w.png", 2)]).unwrap();

        assert!(html.contains("<strong>Widget</strong>"));
        assert!(html.contains("$12.50 &times; 2"));
        assert!(html.contains("$25.00"));
        assert!(html.contains("src=\"w.png\""));
        assert!(html.contains("qty-increment"));
        assert!(html.contains("qty-decrement"));
        assert!(html.contains("remove-from-modal"));
    }

    #[test]
    fn test_cart_items_use_placeholder_image() {
        let html = render_cart_items(&[item("Widget", "1", "", 1)]).unwrap();
        assert!(html.contains(PLACEHOLDER_IMAGE));
    }

    #[test]
    fn test_cart_items_escape_names() {
        let html =
            render_cart_items(&[item("<script>alert(1)</script>", "1", "\" onerror=\"x", 1)])
                .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("\" onerror=\"x"));
    }

    #[test]
    fn test_empty_cart_renders_no_rows() {
        let html = render_cart_items(&[]).unwrap();
        assert!(!html.contains("cart-line"));
    }

    #[test]
    fn test_product_card() {
        let product = Product::new(
            ProductName::parse("Desk Lamp").unwrap(),
            Price::parse_lenient("45"),
            "lamp.png",
        );
        let html = render_product_card(&product).unwrap();

        assert!(html.contains("<h5 class=\"card-title\">Desk Lamp</h5>"));
        assert!(html.contains("data-price=\"45.00\""));
        assert!(html.contains("<p class=\"price mb-3\">$45.00</p>"));
        assert!(html.contains("add-to-cart-btn"));
        assert!(html.contains("remove-btn"));
    }

    #[test]
    fn test_product_card_escapes_user_input() {
        let product = Product::new(
            ProductName::parse("Mug <b>").unwrap(),
            Price::ZERO,
            "x.png\"><script>",
        );
        let html = render_product_card(&product).unwrap();

        assert!(!html.contains("<b>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_totals_view() {
        let totals = Totals {
            subtotal: Decimal::from(200),
            shipping: Decimal::from(10),
            tax: Decimal::from(24),
            discount: Decimal::from(20),
            total: Decimal::from(214),
        };
        let view = TotalsView::from(&totals);
        assert_eq!(view.subtotal, "$200.00");
        assert_eq!(view.discount, "$20.00");
        assert_eq!(view.total, "$214.00");
    }
}
