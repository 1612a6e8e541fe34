use crate::errors::AppError;
use crate::log_info;
use crate::models::order::{
    CreateOrderPayload, Order, OrderCustomer, OrderDetail, OrderFormData, OrderItemWithProduct,
    OrderWithCustomer, PAYMENT_CASH, PAYMENT_CUSTOMER_BALANCE, STATUS_CANCELLED, STATUS_COMPLETED,
    STATUS_PENDING,
};
use crate::validation::{format_currency, validate_notes};
use crate::AppState;

/// Create a new order from the order form.
///
/// All writes run in a single database transaction: the optional balance
/// debit, the order insert and the item inserts either all land or none do.
/// The order number is produced by the store's trigger, not here.
pub async fn create_order(state: &AppState, payload: CreateOrderPayload) -> Result<Order, String> {
    let total = validate_order_payload(&payload)?;

    let mut tx = state.db.begin().await.map_err(|e| e.to_string())?;

    // 1. Debit the customer balance when paying from it. The sufficiency
    //    check reads inside the same transaction; the debit itself is a
    //    server-side delta, never a client-computed value.
    if payload.payment_method == PAYMENT_CUSTOMER_BALANCE {
        let Some(customer_id) = payload.customer_id else {
            return Err("Customer balance payment requires selecting a customer".into());
        };

        let balance: (f64,) = sqlx::query_as("SELECT balance FROM customers WHERE id = ?")
            .bind(customer_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| e.to_string())?
            .ok_or("Customer not found")?;

        if balance.0 < total {
            return Err(format!(
                "Insufficient customer balance. Available: {}, Required: {}",
                format_currency(balance.0),
                format_currency(total)
            ));
        }

        sqlx::query("UPDATE customers SET balance = balance - ? WHERE id = ?")
            .bind(total)
            .bind(customer_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| e.to_string())?;
    }

    // 2. Insert the order; status starts as pending, order_number is filled
    //    by the trigger.
    let res = sqlx::query(
        "INSERT INTO orders (order_number, customer_id, total_amount, status, payment_method, notes)
         VALUES ('', ?, ?, 'pending', ?, ?)",
    )
    .bind(payload.customer_id)
    .bind(total)
    .bind(&payload.payment_method)
    .bind(&payload.notes)
    .execute(&mut *tx)
    .await
    .map_err(|e| e.to_string())?;

    let order_id = res.last_insert_rowid();

    // 3. Insert one item per line, carrying the snapshot unit price.
    for item in &payload.items {
        let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM products WHERE id = ?")
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| e.to_string())?;

        if exists.is_none() {
            return Err(format!("Product id {} not found", item.product_id));
        }

        let total_price = item.quantity as f64 * item.unit_price;

        sqlx::query(
            "INSERT INTO order_items (order_id, product_id, quantity, unit_price, total_price)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(total_price)
        .execute(&mut *tx)
        .await
        .map_err(|e| e.to_string())?;
    }

    tx.commit().await.map_err(|e| e.to_string())?;

    // 4. Return the saved order, order number included.
    let saved = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
        .bind(order_id)
        .fetch_one(&state.db)
        .await
        .map_err(|e| e.to_string())?;

    log_info!(
        "ORDER",
        "Order created",
        serde_json::json!({
            "order_id": saved.id,
            "order_number": saved.order_number,
            "total_amount": saved.total_amount,
            "payment_method": saved.payment_method,
            "item_count": payload.items.len(),
        })
    );

    Ok(saved)
}

/// Pre-write validation of the order payload; returns the computed total.
fn validate_order_payload(payload: &CreateOrderPayload) -> Result<f64, AppError> {
    if payload.items.is_empty() {
        return Err(AppError::Validation(
            "Please add at least one item to the order".into(),
        ));
    }

    match payload.payment_method.as_str() {
        PAYMENT_CASH | PAYMENT_CUSTOMER_BALANCE => {}
        other => {
            return Err(AppError::Validation(format!(
                "Unknown payment method: {}",
                other
            )));
        }
    }

    if payload.payment_method == PAYMENT_CUSTOMER_BALANCE && payload.customer_id.is_none() {
        return Err(AppError::Validation(
            "Customer balance payment requires selecting a customer".into(),
        ));
    }

    let mut total = 0.0;
    for item in &payload.items {
        if item.quantity <= 0 {
            return Err(AppError::Validation(
                "Item quantity must be greater than zero".into(),
            ));
        }
        if !item.unit_price.is_finite() || item.unit_price < 0.0 {
            return Err(AppError::Validation("Item unit price is not valid".into()));
        }
        total += item.quantity as f64 * item.unit_price;
    }

    if let Some(notes) = &payload.notes {
        validate_notes(notes).map_err(AppError::Validation)?;
    }

    Ok(total)
}

/// Move an order out of "pending". Completed and cancelled are terminal;
/// the guarded update makes the transition a no-op if the status changed
/// underneath us.
pub async fn update_order_status(
    state: &AppState,
    order_id: i64,
    new_status: &str,
) -> Result<Order, String> {
    match new_status {
        STATUS_COMPLETED | STATUS_CANCELLED => {}
        other => return Err(format!("Unknown order status: {}", other)),
    }

    let current: (String,) = sqlx::query_as("SELECT status FROM orders WHERE id = ?")
        .bind(order_id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| e.to_string())?
        .ok_or("Order not found")?;

    if current.0 != STATUS_PENDING {
        return Err(format!(
            "Order is already {} and can no longer change status",
            current.0
        ));
    }

    let res = sqlx::query("UPDATE orders SET status = ? WHERE id = ? AND status = 'pending'")
        .bind(new_status)
        .bind(order_id)
        .execute(&state.db)
        .await
        .map_err(|e| e.to_string())?;

    if res.rows_affected() == 0 {
        return Err("Order is no longer pending".into());
    }

    let saved = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
        .bind(order_id)
        .fetch_one(&state.db)
        .await
        .map_err(|e| e.to_string())?;

    log_info!(
        "ORDER",
        "Order status updated",
        serde_json::json!({
            "order_id": order_id,
            "status": new_status,
        })
    );

    Ok(saved)
}

/// All orders with their customer, newest first.
pub async fn get_orders(state: &AppState) -> Result<Vec<OrderWithCustomer>, String> {
    let orders = sqlx::query_as::<_, OrderWithCustomer>(
        "SELECT o.id, o.order_number, o.customer_id,
                c.name AS customer_name, c.email AS customer_email,
                o.total_amount, o.status, o.payment_method, o.notes, o.created_at
         FROM orders o
         LEFT JOIN customers c ON o.customer_id = c.id
         ORDER BY o.created_at DESC, o.id DESC",
    )
    .fetch_all(&state.db)
    .await
    .map_err(|e| e.to_string())?;

    Ok(orders)
}

/// Full detail for the invoice view. A missing id is a not-found error.
pub async fn get_order_detail(state: &AppState, order_id: i64) -> Result<OrderDetail, String> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
        .bind(order_id)
        .fetch_optional(&state.db)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Order not found".into()))?;

    let customer = match order.customer_id {
        Some(customer_id) => sqlx::query_as::<_, OrderCustomer>(
            "SELECT id, name, email, phone, address FROM customers WHERE id = ?",
        )
        .bind(customer_id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| e.to_string())?,
        None => None,
    };

    let items = sqlx::query_as::<_, OrderItemWithProduct>(
        "SELECT oi.id, oi.order_id, oi.product_id,
                p.name AS product_name, p.sku AS product_sku,
                oi.quantity, oi.unit_price, oi.total_price
         FROM order_items oi
         JOIN products p ON oi.product_id = p.id
         WHERE oi.order_id = ?
         ORDER BY oi.id ASC",
    )
    .bind(order_id)
    .fetch_all(&state.db)
    .await
    .map_err(|e| e.to_string())?;

    Ok(OrderDetail {
        order,
        customer,
        items,
    })
}

/// Customers and products for the order form, fetched concurrently.
pub async fn get_order_form_data(state: &AppState) -> Result<OrderFormData, String> {
    let customers = sqlx::query_as::<_, crate::models::customer::CustomerRef>(
        "SELECT id, name, email, balance FROM customers ORDER BY name ASC",
    )
    .fetch_all(&state.db);

    let products = sqlx::query_as::<_, crate::models::product::ProductRef>(
        "SELECT id, name, price, stock_quantity, sku FROM products ORDER BY name ASC",
    )
    .fetch_all(&state.db);

    let (customers, products) = tokio::try_join!(customers, products).map_err(|e| e.to_string())?;

    Ok(OrderFormData {
        customers,
        products,
    })
}
