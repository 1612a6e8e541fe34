use sqlx::SqlitePool;

/// Run all database migrations (CREATE TABLE IF NOT EXISTS + indexes + triggers).
///
/// Order numbers and created_at timestamps are produced by the store itself
/// (trigger / column default), never by the workflows.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // ═══════════════════════════════════════
    // TABLE: customers
    // ═══════════════════════════════════════
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS customers (
            id         INTEGER  PRIMARY KEY AUTOINCREMENT,
            name       TEXT     NOT NULL,
            email      TEXT,
            phone      TEXT,
            address    TEXT,
            balance    REAL     NOT NULL DEFAULT 0,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_customers_name ON customers(name)")
        .execute(pool)
        .await?;

    // ═══════════════════════════════════════
    // TABLE: products
    // ═══════════════════════════════════════
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS products (
            id                  INTEGER  PRIMARY KEY AUTOINCREMENT,
            name                TEXT     NOT NULL,
            description         TEXT,
            price               REAL     NOT NULL CHECK(price >= 0),
            stock_quantity      INTEGER  NOT NULL DEFAULT 0 CHECK(stock_quantity >= 0),
            low_stock_threshold INTEGER  NOT NULL DEFAULT 10,
            category            TEXT,
            sku                 TEXT,
            created_at          DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await?;

    // Partial unique index - SKU must be unique when present
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_products_sku
         ON products(sku) WHERE sku IS NOT NULL",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_name ON products(name)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_category ON products(category)")
        .execute(pool)
        .await?;

    // ═══════════════════════════════════════
    // TABLE: orders
    // ═══════════════════════════════════════
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS orders (
            id             INTEGER  PRIMARY KEY AUTOINCREMENT,
            order_number   TEXT     NOT NULL DEFAULT '',
            customer_id    INTEGER  REFERENCES customers(id) ON DELETE SET NULL,
            total_amount   REAL     NOT NULL CHECK(total_amount >= 0),
            status         TEXT     NOT NULL DEFAULT 'pending'
                           CHECK(status IN ('pending', 'completed', 'cancelled')),
            payment_method TEXT     CHECK(payment_method IN ('cash', 'customer_balance')),
            notes          TEXT,
            created_at     DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await?;

    // Human-readable order number, filled by the store right after insert.
    // Distinct from the row id; unique via the partial index below.
    sqlx::query(
        "CREATE TRIGGER IF NOT EXISTS trg_orders_order_number
         AFTER INSERT ON orders
         FOR EACH ROW
         WHEN NEW.order_number = ''
         BEGIN
             UPDATE orders
             SET order_number = 'ORD-' || strftime('%Y%m%d', 'now') || '-' || printf('%05d', NEW.id)
             WHERE id = NEW.id;
         END",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_orders_number
         ON orders(order_number) WHERE order_number != ''",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders(customer_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_status ON orders(status)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_created_at ON orders(created_at)")
        .execute(pool)
        .await?;

    // ═══════════════════════════════════════
    // TABLE: order_items
    // ═══════════════════════════════════════
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS order_items (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id    INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
            product_id  INTEGER NOT NULL REFERENCES products(id),
            quantity    INTEGER NOT NULL CHECK(quantity > 0),
            unit_price  REAL    NOT NULL CHECK(unit_price >= 0),
            total_price REAL    NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_order_items_order ON order_items(order_id)")
        .execute(pool)
        .await?;

    // ═══════════════════════════════════════
    // TABLE: inventory_transactions (append-only)
    // ═══════════════════════════════════════
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS inventory_transactions (
            id               INTEGER  PRIMARY KEY AUTOINCREMENT,
            product_id       INTEGER  NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            transaction_type TEXT     NOT NULL
                             CHECK(transaction_type IN ('restock', 'sale', 'adjustment')),
            quantity_change  INTEGER  NOT NULL,
            notes            TEXT,
            created_at       DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_inventory_tx_product
         ON inventory_transactions(product_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_inventory_tx_created_at
         ON inventory_transactions(created_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
