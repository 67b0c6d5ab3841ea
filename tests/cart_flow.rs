mod common;

use common::item;
use pos_terminal::{
    cart::{Cart, parse_quantity},
    error::CartError,
};
use uuid::Uuid;

#[test]
fn total_recomputes_after_every_mutation() {
    let mut cart = Cart::new();
    let widget = item("123", "Widget", 1000, 10);
    let gadget = item("456", "Gadget", 500, 10);

    cart.add(&widget, 2).unwrap();
    assert_eq!(cart.total(), 2000);

    cart.add(&gadget, 3).unwrap();
    assert_eq!(cart.total(), 3500);

    cart.set_quantity("123", 1).unwrap();
    assert_eq!(cart.total(), 2500);

    cart.remove("456");
    assert_eq!(cart.total(), 1000);
}

#[test]
fn adding_same_barcode_merges_quantities() {
    let mut cart = Cart::new();
    let widget = item("123", "Widget", 1000, 10);

    cart.add(&widget, 2).unwrap();
    cart.add(&widget, 3).unwrap();

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].quantity, 5);
}

#[test]
fn merge_exceeding_stock_is_rejected_and_cart_unchanged() {
    let mut cart = Cart::new();
    let widget = item("123", "Widget", 1000, 5);

    cart.add(&widget, 3).unwrap();
    let error = cart.add(&widget, 3).unwrap_err();

    assert_eq!(
        error,
        CartError::InsufficientStockMerged {
            available: 5,
            in_cart: 3
        }
    );
    assert_eq!(
        error.to_string(),
        "insufficient stock, available: 5, already 3 in cart"
    );
    assert_eq!(cart.lines()[0].quantity, 3);
    assert_eq!(cart.total(), 3000);
}

#[test]
fn add_rejects_non_positive_and_over_stock_quantities() {
    let mut cart = Cart::new();
    let widget = item("123", "Widget", 1000, 5);

    assert_eq!(cart.add(&widget, 0), Err(CartError::InvalidQuantity));
    assert_eq!(cart.add(&widget, -2), Err(CartError::InvalidQuantity));
    assert_eq!(
        cart.add(&widget, 6),
        Err(CartError::InsufficientStock { available: 5 })
    );
    assert!(cart.is_empty());
}

#[test]
fn set_quantity_zero_is_equivalent_to_remove() {
    let widget = item("123", "Widget", 1000, 5);

    let mut via_set = Cart::new();
    via_set.add(&widget, 2).unwrap();
    via_set.set_quantity("123", 0).unwrap();

    let mut via_remove = Cart::new();
    via_remove.add(&widget, 2).unwrap();
    via_remove.remove("123");

    assert!(via_set.is_empty());
    assert!(via_remove.is_empty());
}

#[test]
fn remove_absent_barcode_is_a_noop() {
    let mut cart = Cart::new();
    cart.add(&item("123", "Widget", 1000, 5), 2).unwrap();

    cart.remove("999");
    cart.remove("999");

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total(), 2000);
}

#[test]
fn set_quantity_above_snapshot_rejected_line_unchanged() {
    let mut cart = Cart::new();
    cart.add(&item("123", "Widget", 1000, 5), 2).unwrap();

    let error = cart.set_quantity("123", 6).unwrap_err();
    assert_eq!(error, CartError::InsufficientStock { available: 5 });
    assert_eq!(cart.lines()[0].quantity, 2);

    // Absent barcodes are left alone.
    cart.set_quantity("999", 3).unwrap();
    assert_eq!(cart.len(), 1);
}

#[test]
fn insertion_order_is_preserved() {
    let mut cart = Cart::new();
    cart.add(&item("333", "Third", 100, 9), 1).unwrap();
    cart.add(&item("111", "First", 100, 9), 1).unwrap();
    cart.add(&item("222", "Second", 100, 9), 1).unwrap();

    let barcodes: Vec<&str> = cart.lines().iter().map(|l| l.barcode.as_str()).collect();
    assert_eq!(barcodes, ["333", "111", "222"]);
}

#[test]
fn request_payload_has_one_entry_per_line_and_omits_empty_options() {
    let mut cart = Cart::new();
    cart.add(&item("123", "Widget", 1000, 10), 2).unwrap();
    cart.add(&item("456", "Gadget", 500, 10), 1).unwrap();

    let bare = serde_json::to_value(cart.to_request(None, None)).unwrap();
    assert_eq!(
        bare,
        serde_json::json!({
            "items": [
                { "barcode": "123", "quantity": 2 },
                { "barcode": "456", "quantity": 1 },
            ]
        })
    );

    let cashier = Uuid::new_v4();
    let tagged = serde_json::to_value(cart.to_request(Some("till-1".into()), Some(cashier))).unwrap();
    assert_eq!(tagged["device_id"], "till-1");
    assert_eq!(tagged["user_id"], serde_json::json!(cashier));
}

#[test]
fn quantity_input_is_parsed_strictly() {
    assert_eq!(parse_quantity("3"), Ok(3));
    assert_eq!(parse_quantity(" 2 "), Ok(2));
    assert_eq!(parse_quantity("0"), Err(CartError::InvalidQuantity));
    assert_eq!(parse_quantity("-1"), Err(CartError::InvalidQuantity));
    assert_eq!(parse_quantity("1.5"), Err(CartError::InvalidQuantity));
    assert_eq!(parse_quantity("abc"), Err(CartError::InvalidQuantity));
    assert_eq!(parse_quantity(""), Err(CartError::InvalidQuantity));
}
