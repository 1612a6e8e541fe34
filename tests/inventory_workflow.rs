//! Integration tests for the stock adjustment workflow and inventory reads.

mod common;

use common::{count_rows, seed_product, setup_state};
use pos_backoffice::commands::{inventory_cmd, report_cmd};
use pos_backoffice::models::inventory::StockAdjustmentPayload;

fn adjustment(product_id: i64, transaction_type: &str, quantity_change: i64) -> StockAdjustmentPayload {
    StockAdjustmentPayload {
        product_id,
        transaction_type: transaction_type.to_string(),
        quantity_change,
        notes: None,
    }
}

#[tokio::test]
async fn restock_applies_delta_and_records_one_transaction() {
    let state = setup_state().await;
    let beans = seed_product(&state, "Coffee Beans", 10.0, 10, 5).await;

    let new_stock = inventory_cmd::adjust_stock(&state, adjustment(beans, "restock", 5))
        .await
        .unwrap();
    assert_eq!(new_stock, 15);

    let (stock,): (i64,) = sqlx::query_as("SELECT stock_quantity FROM products WHERE id = ?")
        .bind(beans)
        .fetch_one(&state.db)
        .await
        .unwrap();
    assert_eq!(stock, 15);

    assert_eq!(count_rows(&state, "inventory_transactions").await, 1);

    let (qty, tx_type): (i64, String) = sqlx::query_as(
        "SELECT quantity_change, transaction_type FROM inventory_transactions WHERE product_id = ?",
    )
    .bind(beans)
    .fetch_one(&state.db)
    .await
    .unwrap();
    assert_eq!(qty, 5);
    assert_eq!(tx_type, "restock");
}

#[tokio::test]
async fn negative_adjustment_removes_stock() {
    let state = setup_state().await;
    let beans = seed_product(&state, "Coffee Beans", 10.0, 10, 5).await;

    let new_stock = inventory_cmd::adjust_stock(&state, adjustment(beans, "adjustment", -3))
        .await
        .unwrap();
    assert_eq!(new_stock, 7);

    let (qty,): (i64,) =
        sqlx::query_as("SELECT quantity_change FROM inventory_transactions WHERE product_id = ?")
            .bind(beans)
            .fetch_one(&state.db)
            .await
            .unwrap();
    assert_eq!(qty, -3);
}

#[tokio::test]
async fn zero_delta_rejected_before_any_write() {
    let state = setup_state().await;
    let beans = seed_product(&state, "Coffee Beans", 10.0, 10, 5).await;

    let err = inventory_cmd::adjust_stock(&state, adjustment(beans, "restock", 0))
        .await
        .unwrap_err();
    assert!(err.contains("valid quantity"));
    assert_eq!(count_rows(&state, "inventory_transactions").await, 0);
}

#[tokio::test]
async fn unknown_product_rejected() {
    let state = setup_state().await;

    let err = inventory_cmd::adjust_stock(&state, adjustment(999, "restock", 5))
        .await
        .unwrap_err();
    assert!(err.contains("Product not found"));
}

#[tokio::test]
async fn unknown_transaction_type_rejected() {
    let state = setup_state().await;
    let beans = seed_product(&state, "Coffee Beans", 10.0, 10, 5).await;

    // "sale" is stored vocabulary, but the adjustment form never produces it
    let err = inventory_cmd::adjust_stock(&state, adjustment(beans, "sale", -1))
        .await
        .unwrap_err();
    assert!(err.contains("Unknown adjustment type"));
}

#[tokio::test]
async fn stock_cannot_go_negative_and_nothing_is_written() {
    let state = setup_state().await;
    let beans = seed_product(&state, "Coffee Beans", 10.0, 2, 5).await;

    let err = inventory_cmd::adjust_stock(&state, adjustment(beans, "adjustment", -5))
        .await
        .unwrap_err();
    assert!(err.contains("negative"));

    let (stock,): (i64,) = sqlx::query_as("SELECT stock_quantity FROM products WHERE id = ?")
        .bind(beans)
        .fetch_one(&state.db)
        .await
        .unwrap();
    assert_eq!(stock, 2);
    assert_eq!(count_rows(&state, "inventory_transactions").await, 0);
}

#[tokio::test]
async fn transaction_history_is_joined_and_newest_first() {
    let state = setup_state().await;
    let beans = seed_product(&state, "Coffee Beans", 10.0, 10, 5).await;

    inventory_cmd::adjust_stock(&state, adjustment(beans, "restock", 5))
        .await
        .unwrap();
    inventory_cmd::adjust_stock(&state, adjustment(beans, "adjustment", -2))
        .await
        .unwrap();

    let history = inventory_cmd::get_inventory_transactions(&state).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].quantity_change, -2);
    assert_eq!(history[1].quantity_change, 5);
    assert_eq!(history[0].product_name, "Coffee Beans");
}

#[tokio::test]
async fn inventory_summary_buckets_products() {
    let state = setup_state().await;
    seed_product(&state, "Gone", 4.0, 0, 5).await;
    seed_product(&state, "Running Low", 10.0, 2, 5).await;
    seed_product(&state, "Plenty", 1.0, 50, 5).await;

    let summary = report_cmd::get_inventory_summary(&state).await.unwrap();
    assert_eq!(summary.total_products, 3);
    // low stock includes out-of-stock products (stock <= threshold)
    assert_eq!(summary.low_stock_count, 2);
    assert_eq!(summary.out_of_stock_count, 1);
    assert_eq!(summary.total_value, 2.0 * 10.0 + 50.0 * 1.0);
}
