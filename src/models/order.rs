use serde::{Deserialize, Serialize};

/// Order status vocabulary, mirrored by the SQL CHECK constraint.
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Payment method vocabulary, mirrored by the SQL CHECK constraint.
pub const PAYMENT_CASH: &str = "cash";
pub const PAYMENT_CUSTOMER_BALANCE: &str = "customer_balance";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    /// System-generated, human-readable, distinct from the row id.
    pub order_number: String,
    /// None = walk-in customer.
    pub customer_id: Option<i64>,
    pub total_amount: f64,
    pub status: String,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

/// Order with customer name/email (JOIN result) for the list view.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderWithCustomer {
    pub id: i64,
    pub order_number: String,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub total_amount: f64,
    pub status: String,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Snapshot of the price at order time, never a live product reference.
    pub unit_price: f64,
    pub total_price: f64,
}

/// Order item with product name/sku (JOIN result) for the invoice view.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItemWithProduct {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_sku: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Customer contact block on the invoice.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderCustomer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Full detail for the order/invoice view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order: Order,
    pub customer: Option<OrderCustomer>,
    pub items: Vec<OrderItemWithProduct>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderPayload {
    /// None = walk-in customer.
    pub customer_id: Option<i64>,
    pub payment_method: String,
    pub notes: Option<String>,
    pub items: Vec<CreateOrderItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderItem {
    pub product_id: i64,
    pub quantity: i64,
    /// Price captured into the form; may be overridden from the product's
    /// list price and is not re-validated against it.
    pub unit_price: f64,
}

/// Data for the order-creation form: both sets are fetched concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderFormData {
    pub customers: Vec<super::customer::CustomerRef>,
    pub products: Vec<super::product::ProductRef>,
}
