//! Properties of the cart store over generated names, prices and quantities.

#![allow(clippy::unwrap_used)]

use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseResult};
use rust_decimal::Decimal;
use trolley_core::pricing::{SHIPPING_FEE, TAX_RATE};
use trolley_core::{CartChange, Price};
use trolley_integration_tests::empty_store;
use trolley_storefront::store::DEFAULT_STORAGE_KEY;
use trolley_storefront::{CartStore, MemoryStore};

const CART_PROPTEST_REGRESSION_FILE: &str = "tests/proptest-regressions/cart_property_test.txt";
const DEFAULT_CART_PROPTEST_CASES: u32 = 128;

fn cart_proptest_cases() -> u32 {
    std::env::var("TROLLEY_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_CART_PROPTEST_CASES)
}

#[derive(Clone, Debug)]
enum CartAction {
    Add { name: String, price: String },
    Remove(String),
    Increment(String),
    Decrement(String),
    SetQuantity(String, i64),
}

fn name_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        Just("Widget".to_string()),
        Just(" Widget ".to_string()),
        Just("Lamp".to_string()),
        Just("Mug".to_string()),
        "[A-Za-z][A-Za-z ]{0,8}",
    ]
    .boxed()
}

fn price_text(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Shelf prices, sub-cent amounts, amounts past `f64` precision and amounts
/// close to `Decimal::MAX`.
fn price_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        4 => (0..100_000_u32).prop_map(price_text),
        1 => (1..1_000_000_i64, 3..=12_u32)
            .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale).to_string()),
        1 => (16..=27_usize, 1..10_u64)
            .prop_map(|(zeros, lead)| format!("{lead}{}", "0".repeat(zeros))),
        1 => (1..=79_227_u64, 0..1_000_000_u64)
            .prop_map(|(head, tail)| format!("{head}{tail:06}000000000000000000")),
        1 => Just(Decimal::MAX.to_string()),
    ]
    .boxed()
}

fn cart_action_strategy() -> BoxedStrategy<CartAction> {
    prop_oneof![
        5 => (name_strategy(), price_strategy())
            .prop_map(|(name, price)| CartAction::Add { name, price }),
        1 => name_strategy().prop_map(CartAction::Remove),
        2 => name_strategy().prop_map(CartAction::Increment),
        2 => name_strategy().prop_map(CartAction::Decrement),
        2 => (name_strategy(), -5..20_i64)
            .prop_map(|(name, quantity)| CartAction::SetQuantity(name, quantity)),
    ]
    .boxed()
}

fn run_action(store: &mut CartStore<MemoryStore>, action: &CartAction) {
    match action {
        CartAction::Add { name, price } => {
            let _ = store.add_item(name, price, "img.png");
        }
        CartAction::Remove(name) => {
            store.remove_item(name);
        }
        CartAction::Increment(name) => {
            store.increment(name);
        }
        CartAction::Decrement(name) => {
            store.decrement(name);
        }
        CartAction::SetQuantity(name, quantity) => {
            store.change_quantity(name, *quantity);
        }
    }
}

fn assert_reload_matches(store: &CartStore<MemoryStore>) -> TestCaseResult {
    let reloaded = CartStore::open(store.storage().clone(), DEFAULT_STORAGE_KEY);
    prop_assert_eq!(reloaded.items(), store.items());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: cart_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(CART_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn repeated_adds_keep_one_line_with_the_last_price(
        name in name_strategy(),
        prices in vec(price_strategy(), 1..12),
    ) {
        let mut store = empty_store();
        for price in &prices {
            store.add_item(&name, price, "img.png").unwrap();
        }

        prop_assert_eq!(store.len(), 1);
        let item = store.items().first().unwrap();
        prop_assert_eq!(usize::try_from(item.quantity()).unwrap(), prices.len());
        let last = prices.last().unwrap();
        prop_assert_eq!(item.price(), Price::parse_lenient(last));
    }

    #[test]
    fn change_quantity_sets_exactly_or_removes(requested in -10..50_i64) {
        let mut store = empty_store();
        store.add_item("Widget", "3", "").unwrap();

        let change = store.change_quantity("Widget", requested);

        if requested <= 0 {
            prop_assert!(matches!(change, CartChange::Removed { .. }), "{change:?}");
            prop_assert!(store.is_empty());
        } else {
            prop_assert_eq!(store.total_quantity(), requested.unsigned_abs());
        }
    }

    #[test]
    fn actions_persist_what_is_held_in_memory(
        actions in vec(cart_action_strategy(), 1..24),
    ) {
        let mut store = empty_store();
        for action in &actions {
            run_action(&mut store, action);
            assert_reload_matches(&store)?;
        }

        let badge: u64 = store.items().iter().map(|item| u64::from(item.quantity())).sum();
        prop_assert_eq!(store.total_quantity(), badge);
        prop_assert!(store.items().iter().all(|item| item.quantity() > 0));
    }

    #[test]
    fn compute_totals_is_pure_and_consistent(
        actions in vec(cart_action_strategy(), 0..16),
        discount_cents in 0..10_000_u32,
    ) {
        let mut store = empty_store();
        for action in &actions {
            run_action(&mut store, action);
        }
        let before = store.items().to_vec();
        let discount = Decimal::new(i64::from(discount_cents), 2);

        let first = store.compute_totals(discount);
        let second = store.compute_totals(discount);

        prop_assert_eq!(first, second);
        prop_assert_eq!(store.items(), before.as_slice());

        let expected_shipping = if store.is_empty() {
            Decimal::ZERO
        } else {
            SHIPPING_FEE
        };
        prop_assert_eq!(first.shipping, expected_shipping);
        prop_assert_eq!(first.tax, first.subtotal.saturating_mul(TAX_RATE));
        prop_assert_eq!(
            first.total,
            first
                .subtotal
                .saturating_add(first.shipping)
                .saturating_add(first.tax)
                .saturating_sub(first.discount)
        );
    }
}
