//! Shared test harness: an in-memory SQLite database with the real schema.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use pos_backoffice::database::migrations::run_migrations;
use pos_backoffice::AppState;

/// Create an AppState backed by an in-memory database with migrations applied.
///
/// A single pooled connection keeps every query on the same in-memory store.
pub async fn setup_state() -> AppState {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Failed to parse connect options")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create in-memory database");

    run_migrations(&pool).await.expect("Failed to run migrations");

    AppState::new(pool)
}

#[allow(dead_code)]
pub async fn seed_customer(state: &AppState, name: &str, balance: f64) -> i64 {
    sqlx::query("INSERT INTO customers (name, balance) VALUES (?, ?)")
        .bind(name)
        .bind(balance)
        .execute(&state.db)
        .await
        .expect("Failed to seed customer")
        .last_insert_rowid()
}

#[allow(dead_code)]
pub async fn seed_product(
    state: &AppState,
    name: &str,
    price: f64,
    stock_quantity: i64,
    low_stock_threshold: i64,
) -> i64 {
    sqlx::query(
        "INSERT INTO products (name, price, stock_quantity, low_stock_threshold) VALUES (?, ?, ?, ?)",
    )
    .bind(name)
    .bind(price)
    .bind(stock_quantity)
    .bind(low_stock_threshold)
    .execute(&state.db)
    .await
    .expect("Failed to seed product")
    .last_insert_rowid()
}

#[allow(dead_code)]
pub async fn count_rows(state: &AppState, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {}", table);
    let (count,): (i64,) = sqlx::query_as(&sql)
        .fetch_one(&state.db)
        .await
        .expect("Failed to count rows");
    count
}
