//! Cart commands.
//!
//! Each invocation mounts the widget on a headless storefront page backed
//! by the file store, replays the shopper's actions as page events and
//! prints whatever the page ends up showing.

use std::io::{self, Write};

use trolley_core::Money;
use trolley_storefront::config::StorefrontConfig;
use trolley_storefront::views::CartItemView;
use trolley_storefront::{CartStore, CartWidget, ElementIds, FileStore, MemoryPage, Page, UiEvent};

/// A widget mounted on a headless page for one command.
pub struct Session {
    page: MemoryPage,
    widget: CartWidget<FileStore>,
    ids: ElementIds,
}

impl Session {
    /// Open the stored cart and attach the widget.
    pub fn open(config: &StorefrontConfig) -> Self {
        tracing::debug!(
            path = %config.storage_path.display(),
            key = %config.storage_key,
            "Opening cart storage"
        );

        let ids = ElementIds::default();
        let mut page = MemoryPage::storefront(&ids);
        let store = CartStore::open(
            FileStore::new(config.storage_path.clone()),
            config.storage_key.clone(),
        );
        let mut widget = CartWidget::mount(&mut page, store, &ids);
        widget.wire(&mut page);

        Self { page, widget, ids }
    }

    fn dispatch(&mut self, event: UiEvent) {
        self.widget.handle(&mut self.page, event);
    }

    /// Print and drain the alerts raised so far.
    fn flush_alerts(&mut self, out: &mut impl Write) -> io::Result<()> {
        for alert in self.page.take_alerts() {
            writeln!(out, "{alert}")?;
        }
        Ok(())
    }

    fn open_panel(&mut self, promo: Option<&str>) -> bool {
        self.dispatch(UiEvent::OpenCheckout);
        if !self.page.is_open(&self.ids.checkout_modal) {
            return false;
        }
        if let Some(code) = promo {
            self.page.set_value(&self.ids.promo_input, code);
            self.dispatch(UiEvent::SubmitPromo);
        }
        true
    }

    fn print_panel(&self, out: &mut impl Write) -> io::Result<()> {
        for item in self.widget.store().items().iter().map(CartItemView::from) {
            writeln!(
                out,
                "{}  {} x {}  {}",
                item.name, item.unit_price, item.quantity, item.line_total
            )?;
        }

        let ids = &self.ids;
        for (label, id) in [
            ("Subtotal", &ids.subtotal),
            ("Shipping", &ids.shipping),
            ("Tax", &ids.tax),
            ("Discount", &ids.discount),
            ("Total", &ids.total),
        ] {
            let shown = self
                .page
                .text(id)
                .unwrap_or_else(|| Money::default().to_string());
            writeln!(out, "{label:<9}{shown:>12}")?;
        }

        if self.page.is_visible(&ids.promo_message) {
            if let Some(message) = self.page.text(&ids.promo_message) {
                writeln!(out, "{message}")?;
            }
        }
        Ok(())
    }
}

pub fn add(
    session: &mut Session,
    out: &mut impl Write,
    name: String,
    price: String,
    image: Option<String>,
) -> io::Result<()> {
    session.dispatch(UiEvent::AddToCart {
        name: Some(name),
        price: Some(price),
        image,
    });
    session.flush_alerts(out)
}

pub fn remove(session: &mut Session, out: &mut impl Write, name: String) -> io::Result<()> {
    session.dispatch(UiEvent::RemoveLine { name });
    session.flush_alerts(out)
}

pub fn increment(session: &mut Session, out: &mut impl Write, name: String) -> io::Result<()> {
    session.dispatch(UiEvent::Increment { name });
    session.flush_alerts(out)
}

pub fn decrement(session: &mut Session, out: &mut impl Write, name: String) -> io::Result<()> {
    session.dispatch(UiEvent::Decrement { name });
    session.flush_alerts(out)
}

pub fn set_quantity(
    session: &mut Session,
    out: &mut impl Write,
    name: String,
    quantity: String,
) -> io::Result<()> {
    session.dispatch(UiEvent::SetQuantity { name, quantity });
    session.flush_alerts(out)
}

/// Print the badge count.
pub fn count(session: &Session, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", session.widget.store().total_quantity())
}

/// Open the checkout panel and print it.
pub fn show(session: &mut Session, out: &mut impl Write, promo: Option<&str>) -> io::Result<()> {
    let opened = session.open_panel(promo);
    session.flush_alerts(out)?;
    if opened {
        session.print_panel(out)?;
    }
    Ok(())
}

/// Open the checkout panel and place the order.
pub fn checkout(
    session: &mut Session,
    out: &mut impl Write,
    promo: Option<&str>,
) -> io::Result<()> {
    if session.open_panel(promo) {
        session.print_panel(out)?;
        session.dispatch(UiEvent::PlaceOrder);
    }
    session.flush_alerts(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn config() -> StorefrontConfig {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let path: PathBuf = std::env::temp_dir().join(format!(
            "trolley-cli-{}-{}/storage.json",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed)
        ));
        StorefrontConfig {
            storage_path: path,
            storage_key: "cart".to_string(),
        }
    }

    fn output(run: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cart_persists_between_sessions() {
        let config = config();

        let mut session = Session::open(&config);
        let printed = output(|out| {
            add(&mut session, out, "Widget".into(), "$100".into(), None)?;
            add(&mut session, out, "Widget".into(), "$100".into(), None)
        });
        assert!(printed.contains("Widget has been added to your cart successfully!"));

        let session = Session::open(&config);
        assert_eq!(output(|out| count(&session, out)), "2\n");
    }

    #[test]
    fn test_show_prints_totals_with_promo() {
        let config = config();
        let mut session = Session::open(&config);
        output(|out| {
            add(&mut session, out, "Widget".into(), "100".into(), None)?;
            set_quantity(&mut session, out, "Widget".into(), "2".into())
        });

        let printed = output(|out| show(&mut session, out, Some("DISCOUNT10")));
        assert!(printed.contains("Widget  $100.00 x 2  $200.00"));
        assert!(printed.contains("$214.00"));
        assert!(printed.contains("10% discount applied successfully!"));
    }

    #[test]
    fn test_checkout_empties_the_cart() {
        let config = config();
        let mut session = Session::open(&config);
        output(|out| add(&mut session, out, "Widget".into(), "100".into(), None));

        let printed = output(|out| checkout(&mut session, out, None));
        assert!(printed.contains("Total: $122.00"));

        let session = Session::open(&config);
        assert_eq!(output(|out| count(&session, out)), "0\n");
    }

    #[test]
    fn test_show_empty_cart() {
        let mut session = Session::open(&config());
        let printed = output(|out| show(&mut session, out, None));
        assert_eq!(
            printed,
            "Your cart is empty! Please add some products first.\n"
        );
    }
}
