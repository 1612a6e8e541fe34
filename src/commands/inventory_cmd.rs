use crate::errors::AppError;
use crate::log_info;
use crate::models::inventory::{
    InventoryTransactionWithProduct, StockAdjustmentPayload, TX_ADJUSTMENT, TX_RESTOCK,
};
use crate::validation::validate_notes;
use crate::AppState;

/// Apply a stock adjustment: append an inventory transaction and move the
/// product's stock by the same signed delta, in one database transaction.
///
/// Returns the new stock level. "sale" transactions are never produced here;
/// the adjustment form only offers restock and adjustment.
pub async fn adjust_stock(
    state: &AppState,
    payload: StockAdjustmentPayload,
) -> Result<i64, String> {
    validate_adjustment_payload(&payload)?;

    let mut tx = state.db.begin().await.map_err(|e| e.to_string())?;

    let current: (i64,) = sqlx::query_as("SELECT stock_quantity FROM products WHERE id = ?")
        .bind(payload.product_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| e.to_string())?
        .ok_or("Product not found")?;

    let new_stock = current.0 + payload.quantity_change;

    if new_stock < 0 {
        return Err(format!(
            "Adjustment would make stock negative (current: {}, change: {})",
            current.0, payload.quantity_change
        ));
    }

    // 1. Record the transaction first; the ledger row exists for every
    //    stock-affecting event.
    sqlx::query(
        "INSERT INTO inventory_transactions (product_id, transaction_type, quantity_change, notes)
         VALUES (?, ?, ?, ?)",
    )
    .bind(payload.product_id)
    .bind(&payload.transaction_type)
    .bind(payload.quantity_change)
    .bind(&payload.notes)
    .execute(&mut *tx)
    .await
    .map_err(|e| e.to_string())?;

    // 2. Apply the delta server-side.
    sqlx::query("UPDATE products SET stock_quantity = stock_quantity + ? WHERE id = ?")
        .bind(payload.quantity_change)
        .bind(payload.product_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| e.to_string())?;

    tx.commit().await.map_err(|e| e.to_string())?;

    log_info!(
        "INVENTORY",
        "Stock adjusted",
        serde_json::json!({
            "product_id": payload.product_id,
            "transaction_type": payload.transaction_type,
            "quantity_change": payload.quantity_change,
            "new_stock": new_stock,
        })
    );

    Ok(new_stock)
}

fn validate_adjustment_payload(payload: &StockAdjustmentPayload) -> Result<(), AppError> {
    match payload.transaction_type.as_str() {
        TX_RESTOCK | TX_ADJUSTMENT => {}
        other => {
            return Err(AppError::Validation(format!(
                "Unknown adjustment type: {}",
                other
            )));
        }
    }

    if payload.quantity_change == 0 {
        return Err(AppError::Validation(
            "Please enter a valid quantity".into(),
        ));
    }

    if let Some(notes) = &payload.notes {
        validate_notes(notes).map_err(AppError::Validation)?;
    }

    Ok(())
}

/// Full inventory transaction history with product names, newest first.
pub async fn get_inventory_transactions(
    state: &AppState,
) -> Result<Vec<InventoryTransactionWithProduct>, String> {
    let transactions = sqlx::query_as::<_, InventoryTransactionWithProduct>(
        "SELECT t.id, t.product_id,
                p.name AS product_name, p.sku AS product_sku,
                t.transaction_type, t.quantity_change, t.notes, t.created_at
         FROM inventory_transactions t
         JOIN products p ON t.product_id = p.id
         ORDER BY t.created_at DESC, t.id DESC",
    )
    .fetch_all(&state.db)
    .await
    .map_err(|e| e.to_string())?;

    Ok(transactions)
}
