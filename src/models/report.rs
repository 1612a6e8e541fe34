use serde::{Deserialize, Serialize};

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub customer_count: i64,
    pub product_count: i64,
    pub order_count: i64,
    /// Sum of total_amount over completed orders only.
    pub total_revenue: f64,
}

/// Stats cards for the inventory page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_products: i64,
    pub low_stock_count: i64,
    pub out_of_stock_count: i64,
    /// Sum of stock_quantity * price over all products.
    pub total_value: f64,
}
