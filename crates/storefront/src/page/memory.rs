//! Headless [`Page`] implementation.
//!
//! Keeps elements, appended nodes, pending timers, listeners and alerts in
//! memory so the widget can run without a browser. Time only moves when
//! [`MemoryPage::advance`] is called.

use std::collections::BTreeMap;
use std::time::Duration;

use super::{ElementIds, EventKind, NodeId, Page};

#[derive(Debug, Clone)]
struct Element {
    text: String,
    html: String,
    value: String,
    class: String,
    visible: bool,
    open: bool,
    form: Option<String>,
}

impl Element {
    const fn new(visible: bool) -> Self {
        Self {
            text: String::new(),
            html: String::new(),
            value: String::new(),
            class: String::new(),
            visible,
            open: false,
            form: None,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: String,
    html: String,
    leaving: bool,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    due: Duration,
    node: NodeId,
}

/// An in-memory page.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    elements: BTreeMap<String, Element>,
    nodes: BTreeMap<NodeId, Node>,
    next_node: u64,
    clock: Duration,
    timers: Vec<Timer>,
    listeners: Vec<(String, EventKind)>,
    alerts: Vec<String>,
}

impl MemoryPage {
    /// An empty page with no elements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A page carrying every element in `ids`, laid out like the storefront
    /// markup: the three product inputs belong to the add-product form, the
    /// promo input to the promo form, and the badge and promo message start
    /// hidden.
    #[must_use]
    pub fn storefront(ids: &ElementIds) -> Self {
        let mut page = Self::new()
            .with_element(&ids.product_list)
            .with_element(&ids.add_product_form)
            .with_input(&ids.product_name_input, &ids.add_product_form)
            .with_input(&ids.product_price_input, &ids.add_product_form)
            .with_input(&ids.product_image_input, &ids.add_product_form)
            .with_element(&ids.add_product_modal)
            .with_element(&ids.cart_count)
            .with_element(&ids.checkout_trigger)
            .with_element(&ids.checkout_modal)
            .with_element(&ids.cart_items)
            .with_element(&ids.promo_form)
            .with_input(&ids.promo_input, &ids.promo_form)
            .with_element(&ids.promo_message)
            .with_element(&ids.final_checkout);

        for id in [&ids.subtotal, &ids.shipping, &ids.tax, &ids.discount, &ids.total] {
            page = page.with_element(id);
            page.set_text(id, "$0.00");
        }
        page.set_visible(&ids.cart_count, false);
        page.set_visible(&ids.promo_message, false);
        page
    }

    /// Add a visible element.
    #[must_use]
    pub fn with_element(mut self, id: &str) -> Self {
        self.elements.insert(id.to_owned(), Element::new(true));
        self
    }

    /// Add an input element belonging to `form`.
    #[must_use]
    pub fn with_input(mut self, id: &str, form: &str) -> Self {
        let mut element = Element::new(true);
        element.form = Some(form.to_owned());
        self.elements.insert(id.to_owned(), element);
        self
    }

    /// Drop an element.
    #[must_use]
    pub fn without(mut self, id: &str) -> Self {
        self.elements.remove(id);
        self
    }

    /// Type into an input.
    pub fn set_value(&mut self, id: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.value = value.to_owned();
        }
    }

    /// Markup last set with [`Page::set_html`].
    #[must_use]
    pub fn html(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.html.as_str())
    }

    /// Markup of the nodes appended to an element, in order.
    #[must_use]
    pub fn children(&self, id: &str) -> Vec<&str> {
        self.nodes
            .values()
            .filter(|node| node.parent == id)
            .map(|node| node.html.as_str())
            .collect()
    }

    /// Whether a node is still attached.
    #[must_use]
    pub fn has_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Whether a node is running its exit transition.
    #[must_use]
    pub fn is_leaving(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.leaving)
    }

    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.visible)
    }

    #[must_use]
    pub fn is_open(&self, id: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.open)
    }

    #[must_use]
    pub fn class(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.class.as_str())
    }

    /// Every alert shown so far.
    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Drain the alerts shown so far.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Registered listeners, in registration order.
    #[must_use]
    pub fn listeners(&self) -> &[(String, EventKind)] {
        &self.listeners
    }

    /// Move the clock forward, firing any timers that fall due.
    pub fn advance(&mut self, by: Duration) {
        self.clock = self.clock.saturating_add(by);
        let now = self.clock;
        let (due, pending): (Vec<Timer>, Vec<Timer>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = pending;
        for timer in due {
            self.nodes.remove(&timer.node);
        }
    }
}

impl Page for MemoryPage {
    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn text(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|e| e.text.clone())
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            text.clone_into(&mut element.text);
        }
    }

    fn value(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|e| e.value.clone())
    }

    fn set_html(&mut self, id: &str, html: &str) {
        let Some(element) = self.elements.get_mut(id) else {
            return;
        };
        html.clone_into(&mut element.html);
        self.nodes.retain(|_, node| node.parent != id);
    }

    fn append_html(&mut self, id: &str, html: &str) -> Option<NodeId> {
        if !self.contains(id) {
            return None;
        }
        self.next_node += 1;
        let node = NodeId::new(self.next_node);
        self.nodes.insert(
            node,
            Node {
                parent: id.to_owned(),
                html: html.to_owned(),
                leaving: false,
            },
        );
        Some(node)
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            element.visible = visible;
        }
    }

    fn set_class(&mut self, id: &str, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            class.clone_into(&mut element.class);
        }
    }

    fn reset_form(&mut self, id: &str) {
        for element in self.elements.values_mut() {
            if element.form.as_deref() == Some(id) {
                element.value.clear();
            }
        }
    }

    fn show_modal(&mut self, id: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.open = true;
        }
    }

    fn hide_modal(&mut self, id: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.open = false;
        }
    }

    fn remove_node_after(&mut self, node: NodeId, delay: Duration) {
        let Some(entry) = self.nodes.get_mut(&node) else {
            return;
        };
        entry.leaving = true;
        self.timers.push(Timer {
            due: self.clock.saturating_add(delay),
            node,
        });
    }

    fn listen(&mut self, id: &str, kind: EventKind) {
        if self.contains(id) {
            self.listeners.push((id.to_owned(), kind));
        }
    }

    fn alert(&mut self, message: &str) {
        tracing::debug!(message, "Alert shown");
        self.alerts.push(message.to_owned());
    }
}
