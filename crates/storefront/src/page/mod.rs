//! The page surface the widget renders into.
//!
//! [`Page`] is the contract between the binder and whatever hosts the
//! markup: a browser document, a test harness, a terminal. Elements are
//! addressed by id; the set of ids the widget needs is configured through
//! [`ElementIds`] and checked once at mount by [`Surface::resolve`].

mod memory;
mod surface;

use std::fmt;
use std::time::Duration;

pub use memory::MemoryPage;
pub use surface::{
    AddProductElements, CheckoutElements, ElementIds, GridElements, PromoElements, Surface,
};

/// Handle to a node appended with [`Page::append_html`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Kinds of events the widget listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
}

/// A rendering surface addressed by element id.
///
/// Operations on ids that do not exist are no-ops; the binder checks for the
/// elements it needs up front instead of at every call.
pub trait Page {
    /// Whether an element with this id exists.
    fn contains(&self, id: &str) -> bool;

    /// Text content of an element.
    fn text(&self, id: &str) -> Option<String>;

    fn set_text(&mut self, id: &str, text: &str);

    /// Current value of an input element.
    fn value(&self, id: &str) -> Option<String>;

    /// Replace an element's children with already-escaped markup.
    fn set_html(&mut self, id: &str, html: &str);

    /// Append already-escaped markup as a new child node of an element.
    fn append_html(&mut self, id: &str, html: &str) -> Option<NodeId>;

    fn set_visible(&mut self, id: &str, visible: bool);

    fn set_class(&mut self, id: &str, class: &str);

    /// Reset every input belonging to a form.
    fn reset_form(&mut self, id: &str);

    fn show_modal(&mut self, id: &str);

    fn hide_modal(&mut self, id: &str);

    /// Start a node's exit transition and detach it once `delay` has passed.
    ///
    /// Fire-and-forget: nothing waits on the removal.
    fn remove_node_after(&mut self, node: NodeId, delay: Duration);

    /// Register interest in `kind` events on an element.
    fn listen(&mut self, id: &str, kind: EventKind);

    /// Show a blocking notification to the shopper.
    fn alert(&mut self, message: &str);
}
