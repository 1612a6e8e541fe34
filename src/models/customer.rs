use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub balance: f64,
    pub created_at: Option<String>,
}

/// Slim customer row for the order form picker.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CustomerRef {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub balance: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerPayload {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Opening balance; defaults to 0 when omitted.
    pub balance: Option<f64>,
}

/// Full-row update; balance here is the manual-edit path, the only balance
/// mutation besides the order workflow debit.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCustomerPayload {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub balance: f64,
}
