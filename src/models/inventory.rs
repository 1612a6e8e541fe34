use serde::{Deserialize, Serialize};

/// Transaction type vocabulary, mirrored by the SQL CHECK constraint.
/// "sale" is part of the stored vocabulary but no workflow currently
/// produces it; order creation does not touch stock.
pub const TX_RESTOCK: &str = "restock";
pub const TX_SALE: &str = "sale";
pub const TX_ADJUSTMENT: &str = "adjustment";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InventoryTransaction {
    pub id: i64,
    pub product_id: i64,
    pub transaction_type: String,
    pub quantity_change: i64,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

/// Transaction with product name/sku (JOIN result) for the history view.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InventoryTransactionWithProduct {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_sku: Option<String>,
    pub transaction_type: String,
    pub quantity_change: i64,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

/// Payload for the stock adjustment workflow.
#[derive(Debug, Clone, Deserialize)]
pub struct StockAdjustmentPayload {
    pub product_id: i64,
    /// "restock" or "adjustment".
    pub transaction_type: String,
    /// Signed delta applied to the product's stock.
    pub quantity_change: i64,
    pub notes: Option<String>,
}
