use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i64,
    pub low_stock_threshold: i64,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub created_at: Option<String>,
}

/// Slim product row for the order form picker.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductRef {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock_quantity: i64,
    pub sku: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Initial stock on hand; defaults to 0 when omitted.
    pub stock_quantity: Option<i64>,
    /// Defaults to 10 when omitted.
    pub low_stock_threshold: Option<i64>,
    pub category: Option<String>,
    pub sku: Option<String>,
}

/// Full-row update. Stock is intentionally absent: stock changes go through
/// the inventory adjustment workflow so every change leaves a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub low_stock_threshold: i64,
    pub category: Option<String>,
    pub sku: Option<String>,
}
