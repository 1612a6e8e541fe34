use crate::log_info;
use crate::models::customer::{CreateCustomerPayload, Customer, UpdateCustomerPayload};
use crate::validation::{validate_amount, validate_customer_input};
use crate::AppState;

/// All customers, newest first.
pub async fn get_customers(state: &AppState) -> Result<Vec<Customer>, String> {
    let customers = sqlx::query_as::<_, Customer>(
        "SELECT * FROM customers ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(&state.db)
    .await
    .map_err(|e| e.to_string())?;

    Ok(customers)
}

/// One customer by id.
pub async fn get_customer(state: &AppState, customer_id: i64) -> Result<Customer, String> {
    let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ?")
        .bind(customer_id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| e.to_string())?
        .ok_or("Customer not found")?;

    Ok(customer)
}

/// Create a customer, optionally with an opening balance.
pub async fn create_customer(
    state: &AppState,
    payload: CreateCustomerPayload,
) -> Result<Customer, String> {
    validate_customer_input(
        &payload.name,
        payload.email.as_deref(),
        payload.phone.as_deref(),
    )?;

    let balance = payload.balance.unwrap_or(0.0);
    validate_amount(balance, Some(-1_000_000_000.0), None)?;

    let res = sqlx::query(
        "INSERT INTO customers (name, email, phone, address, balance) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(payload.name.trim())
    .bind(none_if_blank(payload.email.as_deref()))
    .bind(none_if_blank(payload.phone.as_deref()))
    .bind(none_if_blank(payload.address.as_deref()))
    .bind(balance)
    .execute(&state.db)
    .await
    .map_err(|e| e.to_string())?;

    let saved = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ?")
        .bind(res.last_insert_rowid())
        .fetch_one(&state.db)
        .await
        .map_err(|e| e.to_string())?;

    log_info!(
        "CUSTOMER",
        "Customer created",
        serde_json::json!({ "customer_id": saved.id })
    );

    Ok(saved)
}

/// Update a customer. The balance field is the manual-edit path; the only
/// other balance mutation is the order workflow debit.
pub async fn update_customer(
    state: &AppState,
    customer_id: i64,
    payload: UpdateCustomerPayload,
) -> Result<Customer, String> {
    validate_customer_input(
        &payload.name,
        payload.email.as_deref(),
        payload.phone.as_deref(),
    )?;
    validate_amount(payload.balance, Some(-1_000_000_000.0), None)?;

    let res = sqlx::query(
        "UPDATE customers SET name = ?, email = ?, phone = ?, address = ?, balance = ? WHERE id = ?",
    )
    .bind(payload.name.trim())
    .bind(none_if_blank(payload.email.as_deref()))
    .bind(none_if_blank(payload.phone.as_deref()))
    .bind(none_if_blank(payload.address.as_deref()))
    .bind(payload.balance)
    .bind(customer_id)
    .execute(&state.db)
    .await
    .map_err(|e| e.to_string())?;

    if res.rows_affected() == 0 {
        return Err("Customer not found".into());
    }

    let saved = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ?")
        .bind(customer_id)
        .fetch_one(&state.db)
        .await
        .map_err(|e| e.to_string())?;

    log_info!(
        "CUSTOMER",
        "Customer updated",
        serde_json::json!({ "customer_id": customer_id })
    );

    Ok(saved)
}

/// Blank-or-missing optional fields are stored as NULL, not empty strings.
fn none_if_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
