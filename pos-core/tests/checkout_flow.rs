//! Full register flow against an in-memory store: login, build a cart from
//! the catalog, check out, fulfill the order and close the day.

use pos_core::printing::{MemoryPrinter, PrintService, render_receipt};
use pos_core::store::{MemoryStore, RemoteStore, paths};
use pos_core::{Config, PosState, PreferenceFilter};
use rust_decimal::Decimal;
use serde_json::json;
use shared::{DiscountCode, Preference, Variation, Variations, util};
use std::sync::Arc;

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            paths::PRODUCTS,
            json!({
                "p1": {
                    "id": "p1",
                    "category": "Coffee",
                    "name": "Latte",
                    "stock_status": "In Stock",
                    "variations": {"temperature": {
                        "hot": [{"size": "12oz", "price": 100.0}],
                        "iced": [{"size": "16oz", "price": 120.0}],
                    }},
                },
                "p2": {
                    "id": "p2",
                    "category": "Cake",
                    "name": "Chocolate Cake",
                    "stock_status": "In Stock",
                    "variations": {"standard": {"price": 150.0}},
                },
            }),
        )
        .await
        .unwrap();
    store
        .set(
            paths::CATEGORIES,
            json!({
                "c1": {"id": "c1", "name": "Coffee"},
                "c2": {"id": "c2", "name": "Cake"},
            }),
        )
        .await
        .unwrap();
    store
        .set(
            &paths::staff("s1"),
            json!({
                "id": "s1",
                "name": "Leo",
                "email": "leo@cafe.ph",
                "password": "secret",
                "role": "Cashier",
                "phone": "0917",
                "age": "24",
                "birthday": {"Date": "7", "Month": "3", "Year": "2000"},
            }),
        )
        .await
        .unwrap();
    store.set(paths::ORDER_NUMBER, json!(41)).await.unwrap();
    store
        .set(
            &paths::ingredient("Chocolate Cake"),
            json!({"name": "Chocolate Cake", "quantity": 2, "whole_units": 1}),
        )
        .await
        .unwrap();
    store
        .set(
            &paths::utensil("Hot Cup"),
            json!({"name": "Hot Cup", "quantity": 50}),
        )
        .await
        .unwrap();
    store
        .set(
            &paths::utensil("Spork"),
            json!({"name": "Spork", "quantity": 50}),
        )
        .await
        .unwrap();
    store
        .set(
            &paths::utensil("Tupperware"),
            json!({"name": "Tupperware", "quantity": 50}),
        )
        .await
        .unwrap();
    store
}

fn state_for(store: Arc<MemoryStore>, dir: &tempfile::TempDir) -> PosState {
    let config = Config {
        data_dir: dir.path().join("data"),
        ..Config::default()
    };
    PosState::initialize(config, store).unwrap()
}

#[tokio::test]
async fn checkout_to_daily_close() {
    let store = seeded_store().await;
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(store.clone(), &dir);
    state.start_background_tasks().await.unwrap();

    // Login
    let session = state.sessions.login("s1", "leo@cafe.ph", "secret").await.unwrap();

    // Build the cart from the live catalog
    let latte = state.catalog.find("p1").unwrap();
    let cake = state.catalog.find("p2").unwrap();
    let cake_price = match &cake.variations {
        Variations::Standard { price } => *price,
        _ => unreachable!(),
    };

    let mut cart = pos_core::Cart::new();
    cart.add_line(&latte, Variation::Hot, "12oz", Decimal::new(100, 0))
        .unwrap();
    cart.add_line(&cake, Variation::Standard, "", cake_price).unwrap();
    let cake_key = cart.lines()[1].key();
    cart.increment(&cake_key);
    cart.increment(&cake_key);
    cart.set_customer_name("Ana");
    cart.set_discount(DiscountCode::Senior);
    cart.set_preference(Preference::TakeOut);

    // 100 + 3 * 150 = 550, senior discount 20%
    let receipt = state.checkout.prepare(&cart, &session).unwrap();
    assert_eq!(receipt.subtotal, "550.00");
    assert_eq!(receipt.discount, "110.00");
    assert_eq!(receipt.total, "440.00");

    let order_no = state.checkout.commit(&mut cart, receipt.clone()).await.unwrap();
    assert_eq!(order_no, 41);
    assert!(cart.is_empty());

    // Counter advanced, pending order persisted
    assert_eq!(store.get(paths::ORDER_NUMBER).await.unwrap(), Some(json!(42)));
    let pending = store.get(&paths::order(41)).await.unwrap().unwrap();
    assert_eq!(pending["CustomerName"], "Ana");

    // Three cake slices against two on hand borrows a whole (8 slices)
    let cake_stock = store
        .get(&paths::ingredient("Chocolate Cake"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cake_stock["quantity"], 7);
    assert_eq!(cake_stock["whole_units"], 0);

    // Take-out consumed a hot cup and the standard utensil pair
    let hot_cup = store.get(&paths::utensil("Hot Cup")).await.unwrap().unwrap();
    assert_eq!(hot_cup["quantity"], 49);
    // Three cake servings each take the standard pair
    let spork = store.get(&paths::utensil("Spork")).await.unwrap().unwrap();
    assert_eq!(spork["quantity"], 47);

    // Print the customer receipt
    let printer = MemoryPrinter::default();
    let document = render_receipt(&state.config.cafe_name, &state.config.cafe_address, order_no, &receipt);
    state.printer.print(&document).unwrap();
    printer.print(&document).unwrap();
    assert!(printer.documents()[0].contains("Total: 440.00"));

    // The board picks the order up from the feed
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(1);
    loop {
        if !state.fulfillment.filtered(PreferenceFilter::TakeOut, "").is_empty() {
            break;
        }
        assert!(tokio::time::Instant::now() < deadline, "board never saw the order");
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    // Fulfill: the order moves from pending to history
    state.fulfillment.mark_done("41").await.unwrap();
    assert!(store.get(&paths::order(41)).await.unwrap().is_none());

    // History shows it and the day closes with one transaction
    state.history.refresh().await.unwrap();
    let rows = state.history.visible();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].order_no, "41");
    assert_eq!(rows[0].quantity, 4);
    assert_eq!(rows[0].total, Decimal::new(44000, 2));

    let today = util::parse_order_datetime(&rows[0].date).unwrap().date();
    let close_printer = MemoryPrinter::default();
    assert!(state.history.close_transaction(today, &close_printer).unwrap());
    assert!(close_printer.documents()[0].contains("Grand Total: 440.00"));
}

#[tokio::test]
async fn restored_session_can_check_out() {
    let store = seeded_store().await;
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(store.clone(), &dir);
    state.start_background_tasks().await.unwrap();

    state.sessions.login("s1", "leo@cafe.ph", "secret").await.unwrap();

    // A relaunch restores the session from the device cache
    let session = state.sessions.restore().unwrap().unwrap();

    let latte = state.catalog.find("p1").unwrap();
    let mut cart = pos_core::Cart::new();
    cart.add_line(&latte, Variation::Iced, "16oz", Decimal::new(120, 0))
        .unwrap();
    cart.set_customer_name("Ben");

    let receipt = state.checkout.prepare(&cart, &session).unwrap();
    assert_eq!(receipt.staff_name, "Leo");
    let order_no = state.checkout.commit(&mut cart, receipt).await.unwrap();
    assert_eq!(order_no, 41);
}
