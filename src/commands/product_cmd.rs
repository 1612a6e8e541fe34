use crate::log_info;
use crate::models::product::{CreateProductPayload, Product, UpdateProductPayload};
use crate::validation::validate_product_input;
use crate::AppState;

/// All products, newest first.
pub async fn get_products(state: &AppState) -> Result<Vec<Product>, String> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(&state.db)
    .await
    .map_err(|e| e.to_string())?;

    Ok(products)
}

/// One product by id.
pub async fn get_product(state: &AppState, product_id: i64) -> Result<Product, String> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| e.to_string())?
        .ok_or("Product not found")?;

    Ok(product)
}

/// Create a product with its initial stock on hand.
pub async fn create_product(
    state: &AppState,
    payload: CreateProductPayload,
) -> Result<Product, String> {
    let stock_quantity = payload.stock_quantity.unwrap_or(0);
    let low_stock_threshold = payload.low_stock_threshold.unwrap_or(10);

    validate_product_input(
        &payload.name,
        payload.price,
        stock_quantity,
        low_stock_threshold,
        payload.sku.as_deref(),
    )?;

    let result = sqlx::query(
        "INSERT INTO products (name, description, price, stock_quantity, low_stock_threshold, category, sku)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(payload.name.trim())
    .bind(none_if_blank(payload.description.as_deref()))
    .bind(payload.price)
    .bind(stock_quantity)
    .bind(low_stock_threshold)
    .bind(none_if_blank(payload.category.as_deref()))
    .bind(none_if_blank(payload.sku.as_deref()))
    .execute(&state.db)
    .await;

    match result {
        Ok(res) => {
            let saved = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
                .bind(res.last_insert_rowid())
                .fetch_one(&state.db)
                .await
                .map_err(|e| e.to_string())?;

            log_info!(
                "PRODUCT",
                "Product created",
                serde_json::json!({ "product_id": saved.id })
            );

            Ok(saved)
        }
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            Err("SKU is already in use".into())
        }
        Err(e) => Err(e.to_string()),
    }
}

/// Update a product's catalog fields. Stock changes go through the inventory
/// adjustment workflow instead, so every change leaves a transaction.
pub async fn update_product(
    state: &AppState,
    product_id: i64,
    payload: UpdateProductPayload,
) -> Result<Product, String> {
    validate_product_input(
        &payload.name,
        payload.price,
        0,
        payload.low_stock_threshold,
        payload.sku.as_deref(),
    )?;

    let result = sqlx::query(
        "UPDATE products SET name = ?, description = ?, price = ?, low_stock_threshold = ?, category = ?, sku = ?
         WHERE id = ?",
    )
    .bind(payload.name.trim())
    .bind(none_if_blank(payload.description.as_deref()))
    .bind(payload.price)
    .bind(payload.low_stock_threshold)
    .bind(none_if_blank(payload.category.as_deref()))
    .bind(none_if_blank(payload.sku.as_deref()))
    .bind(product_id)
    .execute(&state.db)
    .await;

    match result {
        Ok(res) if res.rows_affected() == 0 => Err("Product not found".into()),
        Ok(_) => {
            let saved = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
                .bind(product_id)
                .fetch_one(&state.db)
                .await
                .map_err(|e| e.to_string())?;

            log_info!(
                "PRODUCT",
                "Product updated",
                serde_json::json!({ "product_id": product_id })
            );

            Ok(saved)
        }
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            Err("SKU is already in use".into())
        }
        Err(e) => Err(e.to_string()),
    }
}

/// Products at or below their low-stock threshold, most depleted first.
pub async fn get_low_stock_products(state: &AppState) -> Result<Vec<Product>, String> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products
         WHERE stock_quantity <= low_stock_threshold
         ORDER BY stock_quantity ASC, name ASC",
    )
    .fetch_all(&state.db)
    .await
    .map_err(|e| e.to_string())?;

    Ok(products)
}

fn none_if_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
