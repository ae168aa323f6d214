//! The presentation binder.
//!
//! [`CartWidget`] is the composition root of the widget: it owns the
//! [`CartStore`], knows which page features are available ([`Surface`]) and
//! turns [`UiEvent`]s into store operations followed by re-renders. It holds
//! no cart state of its own; the only view state is what the page displays,
//! which is where the promo discount lives between renders.
//!
//! ```text
//! UiEvent -> CartStore mutation -> storage write -> badge / panel refresh
//! ```

use std::time::Duration;

use rust_decimal::Decimal;
use trolley_core::pricing::{PROMO_CODE, apply_promo};
use trolley_core::{
    CartChange, Money, Price, Product, ProductName, PromoOutcome, Totals, quantity_from_input,
    sanitize_amount,
};

use crate::page::{CheckoutElements, ElementIds, EventKind, NodeId, Page, Surface};
use crate::storage::KeyValueStore;
use crate::store::CartStore;
use crate::views::{self, TotalsView};

/// How long a removed product card animates before it is detached.
pub const CARD_REMOVAL_DELAY: Duration = Duration::from_millis(300);

/// Name used when an add-to-cart control carries none.
const FALLBACK_PRODUCT_NAME: &str = "Product";

/// Shopper-facing messages.
pub mod messages {
    pub const EMPTY_CART: &str = "Your cart is empty! Please add some products first.";
    pub const CART_NOW_EMPTY: &str = "Your cart is now empty!";
    pub const CHECKOUT_UNAVAILABLE: &str = "Checkout is unavailable on this page.";
    pub const RENDER_FAILED: &str = "Sorry, something went wrong displaying your cart.";
    pub const INCOMPLETE_PRODUCT: &str = "Please fill all fields correctly.";
    pub const PROMO_APPLIED: &str = "10% discount applied successfully!";
    pub const PROMO_SUCCESS_CLASS: &str = "text-success small mt-1";
    pub const PROMO_ERROR_CLASS: &str = "text-danger small mt-1";

    /// Rejection text naming the recognized code.
    #[must_use]
    pub fn promo_rejected(code: &str) -> String {
        format!("Invalid promo code. Try '{code}'.")
    }
}

/// Interactions the page reports to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// An "Add to Cart" control was clicked, carrying its data attributes.
    AddToCart {
        name: Option<String>,
        price: Option<String>,
        image: Option<String>,
    },
    /// A product card's "Remove" control was clicked.
    RemoveProduct { card: NodeId, name: String },
    /// The cart button was clicked.
    OpenCheckout,
    /// A checkout row's increment control was clicked.
    Increment { name: String },
    /// A checkout row's decrement control was clicked.
    Decrement { name: String },
    /// A checkout row's quantity was typed in.
    SetQuantity { name: String, quantity: String },
    /// A checkout row's delete control was clicked.
    RemoveLine { name: String },
    /// The promo form was submitted.
    SubmitPromo,
    /// The final checkout button was clicked.
    PlaceOrder,
    /// The add-product form was submitted.
    SubmitProduct,
}

/// The cart widget bound to one page.
#[derive(Debug)]
pub struct CartWidget<S> {
    store: CartStore<S>,
    surface: Surface,
    wired: bool,
}

impl<S: KeyValueStore> CartWidget<S> {
    /// Check the page for collaborators and show the current badge count.
    pub fn mount(page: &mut impl Page, store: CartStore<S>, ids: &ElementIds) -> Self {
        let surface = Surface::resolve(page, ids);
        let widget = Self {
            store,
            surface,
            wired: false,
        };
        widget.refresh_badge(page);
        tracing::info!(items = widget.store.len(), "Cart widget mounted");
        widget
    }

    /// Attach listeners for every available feature.
    ///
    /// Only the first call does anything; later calls return `false` so a
    /// page that runs its setup twice still handles each action once.
    pub fn wire(&mut self, page: &mut impl Page) -> bool {
        if self.wired {
            tracing::debug!("Listeners already attached");
            return false;
        }
        self.wired = true;

        if let Some(grid) = &self.surface.grid {
            page.listen(&grid.product_list, EventKind::Click);
        }
        if let Some(checkout) = &self.surface.checkout {
            page.listen(&checkout.trigger, EventKind::Click);
            page.listen(&checkout.items, EventKind::Click);
            page.listen(&checkout.final_checkout, EventKind::Click);
        }
        if let Some(promo) = &self.surface.promo {
            page.listen(&promo.form, EventKind::Submit);
        }
        if let Some(add_product) = &self.surface.add_product {
            page.listen(&add_product.form, EventKind::Submit);
        }
        true
    }

    #[must_use]
    pub const fn is_wired(&self) -> bool {
        self.wired
    }

    #[must_use]
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    #[must_use]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Render product cards into the grid, returning their node handles.
    pub fn render_products(&self, page: &mut impl Page, products: &[Product]) -> Vec<NodeId> {
        let Some(grid) = &self.surface.grid else {
            return Vec::new();
        };

        products
            .iter()
            .filter_map(|product| match views::render_product_card(product) {
                Ok(html) => page.append_html(&grid.product_list, &html),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        product = %product.name,
                        "Failed to render product card"
                    );
                    None
                }
            })
            .collect()
    }

    /// Handle one page event.
    pub fn handle(&mut self, page: &mut impl Page, event: UiEvent) {
        if !self.wired {
            tracing::debug!(?event, "Ignoring event before listeners are attached");
            return;
        }

        match event {
            UiEvent::AddToCart { name, price, image } => {
                self.add_to_cart(page, name, price, image);
            }
            UiEvent::RemoveProduct { card, name } => self.remove_product(page, card, &name),
            UiEvent::OpenCheckout => self.open_checkout(page),
            UiEvent::Increment { name } => self.row_action(page, |store| store.increment(&name)),
            UiEvent::Decrement { name } => self.row_action(page, |store| store.decrement(&name)),
            UiEvent::SetQuantity { name, quantity } => {
                let requested = quantity_from_input(&quantity);
                self.row_action(page, |store| store.change_quantity(&name, requested));
            }
            UiEvent::RemoveLine { name } => {
                self.row_action(page, |store| store.remove_item(&name));
            }
            UiEvent::SubmitPromo => self.submit_promo(page),
            UiEvent::PlaceOrder => self.place_order(page),
            UiEvent::SubmitProduct => self.submit_product(page),
        }
    }

    fn add_to_cart(
        &mut self,
        page: &mut impl Page,
        name: Option<String>,
        price: Option<String>,
        image: Option<String>,
    ) {
        if self.surface.grid.is_none() {
            tracing::debug!("Product grid unavailable, ignoring add");
            return;
        }

        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_PRODUCT_NAME.to_string());
        let price = price.unwrap_or_default();
        let image = image.unwrap_or_default();

        match self.store.add_item(&name, &price, &image) {
            Ok(change) => self.announce(page, &change),
            Err(e) => {
                tracing::warn!(error = %e, "Rejected add to cart");
                page.alert(&e.to_string());
            }
        }
    }

    fn remove_product(&mut self, page: &mut impl Page, card: NodeId, name: &str) {
        if self.surface.grid.is_none() {
            return;
        }

        let change = self.store.remove_item(name);
        self.announce(page, &change);
        page.remove_node_after(card, CARD_REMOVAL_DELAY);
    }

    fn open_checkout(&self, page: &mut impl Page) {
        let Some(checkout) = &self.surface.checkout else {
            page.alert(messages::CHECKOUT_UNAVAILABLE);
            return;
        };

        if self.store.is_empty() {
            page.alert(messages::EMPTY_CART);
            return;
        }

        if self.render_checkout(page, checkout) {
            page.show_modal(&checkout.modal);
        }
    }

    /// Apply a checkout-row action, then refresh or close the panel.
    fn row_action(
        &mut self,
        page: &mut impl Page,
        action: impl FnOnce(&mut CartStore<S>) -> CartChange,
    ) {
        let Some(checkout) = &self.surface.checkout else {
            return;
        };

        let change = action(&mut self.store);
        self.announce(page, &change);
        if self.store.is_empty() {
            page.set_html(&checkout.items, "");
            write_totals(page, checkout, &Totals::default());
            page.hide_modal(&checkout.modal);
            page.alert(messages::CART_NOW_EMPTY);
        } else {
            self.render_checkout(page, checkout);
        }
    }

    fn submit_promo(&self, page: &mut impl Page) {
        let (Some(promo), Some(checkout)) = (&self.surface.promo, &self.surface.checkout) else {
            return;
        };

        let code = page.value(&promo.input).unwrap_or_default();
        let subtotal = self.store.compute_totals(Decimal::ZERO).subtotal;
        let outcome = apply_promo(&code, subtotal);
        let totals = self.store.compute_totals(outcome.discount());
        write_totals(page, checkout, &totals);

        let (message, class) = match outcome {
            PromoOutcome::Applied { discount } => {
                tracing::info!(%discount, "Promo code applied");
                (
                    messages::PROMO_APPLIED.to_string(),
                    messages::PROMO_SUCCESS_CLASS,
                )
            }
            PromoOutcome::Rejected => {
                tracing::info!(code = %code.trim(), "Promo code rejected");
                (
                    messages::promo_rejected(PROMO_CODE),
                    messages::PROMO_ERROR_CLASS,
                )
            }
        };
        page.set_visible(&promo.message, true);
        page.set_text(&promo.message, &message);
        page.set_class(&promo.message, class);
    }

    fn place_order(&mut self, page: &mut impl Page) {
        let Some(checkout) = &self.surface.checkout else {
            return;
        };

        let total = page
            .text(&checkout.total)
            .map_or(Decimal::ZERO, |text| sanitize_amount(&text));

        if total <= Decimal::ZERO || self.store.is_empty() {
            page.alert(messages::EMPTY_CART);
            return;
        }

        page.alert(&format!(
            "Thank you! Your order has been placed successfully. Total: {}",
            Money::new(total)
        ));
        tracing::info!(%total, items = self.store.len(), "Order placed");

        self.store.clear();
        self.refresh_badge(page);
        write_totals(page, checkout, &Totals::default());
        page.hide_modal(&checkout.modal);
    }

    fn submit_product(&self, page: &mut impl Page) {
        let Some(form) = &self.surface.add_product else {
            return;
        };

        let name = page.value(&form.name).unwrap_or_default();
        let price = page.value(&form.price).unwrap_or_default();
        let image = page.value(&form.image).unwrap_or_default();
        let image = image.trim();

        let Ok(name) = ProductName::parse(&name) else {
            page.alert(messages::INCOMPLETE_PRODUCT);
            return;
        };
        if price.is_empty() || image.is_empty() {
            page.alert(messages::INCOMPLETE_PRODUCT);
            return;
        }

        let product = Product::new(name, Price::parse_lenient(&price), image);
        match views::render_product_card(&product) {
            Ok(html) => {
                page.append_html(&form.product_list, &html);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to render product card");
                page.alert(messages::RENDER_FAILED);
                return;
            }
        }

        if let Some(modal) = &form.modal {
            page.hide_modal(modal);
        }
        page.reset_form(&form.form);
        page.alert(&format!("{} added successfully!", product.name));
        tracing::info!(product = %product.name, "Product added to grid");
    }

    /// Render rows and totals. The discount is whatever the panel shows.
    fn render_checkout(&self, page: &mut impl Page, checkout: &CheckoutElements) -> bool {
        let html = match views::render_cart_items(self.store.items()) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!(error = %e, "Failed to render checkout rows");
                page.alert(messages::RENDER_FAILED);
                return false;
            }
        };
        page.set_html(&checkout.items, &html);

        let discount = displayed_discount(page, checkout);
        let totals = self.store.compute_totals(discount);
        write_totals(page, checkout, &totals);
        true
    }

    fn announce(&self, page: &mut impl Page, change: &CartChange) {
        self.refresh_badge(page);
        if let Some(message) = notice(change) {
            page.alert(&message);
        }
    }

    fn refresh_badge(&self, page: &mut impl Page) {
        let Some(badge) = &self.surface.badge else {
            return;
        };
        let count = self.store.total_quantity();
        page.set_text(badge, &count.to_string());
        page.set_visible(badge, count > 0);
    }
}

/// Confirmation shown after a cart change, if any.
fn notice(change: &CartChange) -> Option<String> {
    match change {
        CartChange::Added { name, .. } => {
            Some(format!("{name} has been added to your cart successfully!"))
        }
        CartChange::Removed { name } => Some(format!("{name} has been removed from your cart.")),
        CartChange::QuantityChanged { name, quantity } => {
            Some(format!("{name} quantity updated to {quantity}."))
        }
        CartChange::Cleared | CartChange::Unchanged => None,
    }
}

fn displayed_discount(page: &impl Page, checkout: &CheckoutElements) -> Decimal {
    let shown = page
        .text(&checkout.discount)
        .map_or(Decimal::ZERO, |text| sanitize_amount(&text));
    shown.max(Decimal::ZERO)
}

fn write_totals(page: &mut impl Page, checkout: &CheckoutElements, totals: &Totals) {
    let view = TotalsView::from(totals);
    page.set_text(&checkout.subtotal, &view.subtotal);
    page.set_text(&checkout.shipping, &view.shipping);
    page.set_text(&checkout.tax, &view.tax);
    page.set_text(&checkout.discount, &view.discount);
    page.set_text(&checkout.total, &view.total);
}
