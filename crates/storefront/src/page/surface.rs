//! Element ids and the capability check run at mount.

use super::Page;

/// Ids of every element the widget can use.
///
/// Defaults match the storefront markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub product_list: String,
    pub add_product_form: String,
    pub product_name_input: String,
    pub product_price_input: String,
    pub product_image_input: String,
    pub add_product_modal: String,
    pub cart_count: String,
    pub checkout_trigger: String,
    pub checkout_modal: String,
    pub cart_items: String,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub discount: String,
    pub total: String,
    pub promo_form: String,
    pub promo_input: String,
    pub promo_message: String,
    pub final_checkout: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            product_list: "productList".to_string(),
            add_product_form: "addProductForm".to_string(),
            product_name_input: "productName".to_string(),
            product_price_input: "productPrice".to_string(),
            product_image_input: "productImage".to_string(),
            add_product_modal: "addProductModal".to_string(),
            cart_count: "cart-count".to_string(),
            checkout_trigger: "cart-btn".to_string(),
            checkout_modal: "checkoutModal".to_string(),
            cart_items: "cart-items".to_string(),
            subtotal: "subtotal".to_string(),
            shipping: "shipping-fee".to_string(),
            tax: "tax".to_string(),
            discount: "discount".to_string(),
            total: "total-price".to_string(),
            promo_form: "promo-form".to_string(),
            promo_input: "promo-code".to_string(),
            promo_message: "promo-message".to_string(),
            final_checkout: "final-checkout".to_string(),
        }
    }
}

/// Product grid collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridElements {
    pub product_list: String,
}

/// Checkout panel collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutElements {
    pub trigger: String,
    pub modal: String,
    pub items: String,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub discount: String,
    pub total: String,
    pub final_checkout: String,
}

/// Promo form collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoElements {
    pub form: String,
    pub input: String,
    pub message: String,
}

/// Add-product form collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddProductElements {
    pub form: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub product_list: String,
    /// Closed after a successful submission when present.
    pub modal: Option<String>,
}

/// The collaborators found on a page, grouped by feature.
///
/// A feature is enabled only when every element it needs exists; the promo
/// form additionally needs the checkout panel it writes totals into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    pub grid: Option<GridElements>,
    pub badge: Option<String>,
    pub checkout: Option<CheckoutElements>,
    pub promo: Option<PromoElements>,
    pub add_product: Option<AddProductElements>,
}

impl Surface {
    /// Check which features `page` can support.
    pub fn resolve(page: &impl Page, ids: &ElementIds) -> Self {
        let grid = feature(page, "product grid", &[&ids.product_list], || GridElements {
            product_list: ids.product_list.clone(),
        });

        let badge = feature(page, "cart badge", &[&ids.cart_count], || {
            ids.cart_count.clone()
        });

        let checkout = feature(
            page,
            "checkout panel",
            &[
                &ids.checkout_trigger,
                &ids.checkout_modal,
                &ids.cart_items,
                &ids.subtotal,
                &ids.shipping,
                &ids.tax,
                &ids.discount,
                &ids.total,
                &ids.final_checkout,
            ],
            || CheckoutElements {
                trigger: ids.checkout_trigger.clone(),
                modal: ids.checkout_modal.clone(),
                items: ids.cart_items.clone(),
                subtotal: ids.subtotal.clone(),
                shipping: ids.shipping.clone(),
                tax: ids.tax.clone(),
                discount: ids.discount.clone(),
                total: ids.total.clone(),
                final_checkout: ids.final_checkout.clone(),
            },
        );

        let promo = if checkout.is_some() {
            feature(
                page,
                "promo form",
                &[&ids.promo_form, &ids.promo_input, &ids.promo_message],
                || PromoElements {
                    form: ids.promo_form.clone(),
                    input: ids.promo_input.clone(),
                    message: ids.promo_message.clone(),
                },
            )
        } else {
            tracing::warn!(feature = "promo form", "Feature disabled: needs the checkout panel");
            None
        };

        let add_product = feature(
            page,
            "add-product form",
            &[
                &ids.add_product_form,
                &ids.product_name_input,
                &ids.product_price_input,
                &ids.product_image_input,
                &ids.product_list,
            ],
            || AddProductElements {
                form: ids.add_product_form.clone(),
                name: ids.product_name_input.clone(),
                price: ids.product_price_input.clone(),
                image: ids.product_image_input.clone(),
                product_list: ids.product_list.clone(),
                modal: page
                    .contains(&ids.add_product_modal)
                    .then(|| ids.add_product_modal.clone()),
            },
        );

        Self {
            grid,
            badge,
            checkout,
            promo,
            add_product,
        }
    }
}

fn feature<T>(
    page: &impl Page,
    name: &str,
    required: &[&String],
    build: impl FnOnce() -> T,
) -> Option<T> {
    let missing: Vec<&str> = required
        .iter()
        .filter(|id| !page.contains(id))
        .map(|id| id.as_str())
        .collect();

    if missing.is_empty() {
        Some(build())
    } else {
        tracing::warn!(feature = name, ?missing, "Feature disabled: elements not found");
        None
    }
}
