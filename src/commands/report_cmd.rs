use crate::models::report::{DashboardSummary, InventorySummary};
use crate::AppState;

/// Headline counts and revenue for the dashboard. The three reads have no
/// ordering dependency, so they run concurrently.
pub async fn get_dashboard_summary(state: &AppState) -> Result<DashboardSummary, String> {
    let customers = sqlx::query_as::<_, (i64,)>("SELECT COUNT(id) FROM customers")
        .fetch_one(&state.db);

    let products = sqlx::query_as::<_, (i64,)>("SELECT COUNT(id) FROM products")
        .fetch_one(&state.db);

    let orders = sqlx::query_as::<_, (i64, f64)>(
        "SELECT COUNT(id),
                COALESCE(SUM(CASE WHEN status = 'completed' THEN total_amount ELSE 0 END), 0.0)
         FROM orders",
    )
    .fetch_one(&state.db);

    let ((customer_count,), (product_count,), (order_count, total_revenue)) =
        tokio::try_join!(customers, products, orders).map_err(|e| e.to_string())?;

    Ok(DashboardSummary {
        customer_count,
        product_count,
        order_count,
        total_revenue,
    })
}

/// Stats cards for the inventory page.
pub async fn get_inventory_summary(state: &AppState) -> Result<InventorySummary, String> {
    let (total_products, low_stock_count, out_of_stock_count, total_value): (i64, i64, i64, f64) =
        sqlx::query_as(
            "SELECT COUNT(id),
                    COALESCE(SUM(CASE WHEN stock_quantity <= low_stock_threshold THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN stock_quantity = 0 THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(stock_quantity * price), 0.0)
             FROM products",
        )
        .fetch_one(&state.db)
        .await
        .map_err(|e| e.to_string())?;

    Ok(InventorySummary {
        total_products,
        low_stock_count,
        out_of_stock_count,
        total_value,
    })
}
