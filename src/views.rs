//! In-memory table widgets backing the entity list views.
//!
//! Each widget holds the full fetched row set and derives the visible subset
//! purely and synchronously every time a filter input changes. Filter state is
//! never persisted. Every widget distinguishes an empty source dataset from a
//! non-empty dataset where the filters matched nothing, so the two cases can
//! render different guidance.

use crate::models::customer::Customer;
use crate::models::inventory::InventoryTransactionWithProduct;
use crate::models::order::OrderWithCustomer;
use crate::models::product::Product;

/// What the table body should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    /// The source dataset itself is empty.
    EmptySource,
    /// The source has rows but the active filters matched none of them.
    NoMatches,
    /// At least one row is visible.
    Rows,
}

fn table_state(source_len: usize, visible_len: usize) -> TableState {
    if source_len == 0 {
        TableState::EmptySource
    } else if visible_len == 0 {
        TableState::NoMatches
    } else {
        TableState::Rows
    }
}

/// Stock-level bucket for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

pub fn stock_status(stock_quantity: i64, low_stock_threshold: i64) -> StockStatus {
    if stock_quantity == 0 {
        StockStatus::OutOfStock
    } else if stock_quantity <= low_stock_threshold {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

/// Categorical stock filter offered next to the product search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockLevelFilter {
    #[default]
    All,
    InStock,
    LowStock,
    OutOfStock,
}

impl StockLevelFilter {
    fn matches(&self, product: &Product) -> bool {
        match self {
            StockLevelFilter::All => true,
            StockLevelFilter::InStock => {
                stock_status(product.stock_quantity, product.low_stock_threshold)
                    == StockStatus::InStock
            }
            StockLevelFilter::LowStock => {
                stock_status(product.stock_quantity, product.low_stock_threshold)
                    == StockStatus::LowStock
            }
            StockLevelFilter::OutOfStock => {
                stock_status(product.stock_quantity, product.low_stock_threshold)
                    == StockStatus::OutOfStock
            }
        }
    }
}

/// Case-insensitive substring match.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn opt_contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.map_or(false, |h| contains_ci(h, needle))
}

// ─────────────────────────────────────────
// Customers
// ─────────────────────────────────────────

pub struct CustomerTable {
    rows: Vec<Customer>,
    pub search: String,
}

impl CustomerTable {
    pub fn new(rows: Vec<Customer>) -> Self {
        Self {
            rows,
            search: String::new(),
        }
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    /// Match on name or email (case-insensitive) or phone (verbatim digits).
    pub fn visible(&self) -> Vec<&Customer> {
        self.rows
            .iter()
            .filter(|c| {
                self.search.is_empty()
                    || contains_ci(&c.name, &self.search)
                    || opt_contains_ci(c.email.as_deref(), &self.search)
                    || c.phone.as_deref().map_or(false, |p| p.contains(&self.search))
            })
            .collect()
    }

    pub fn state(&self) -> TableState {
        table_state(self.rows.len(), self.visible().len())
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        match self.state() {
            TableState::EmptySource => Some("No customers added yet."),
            TableState::NoMatches => Some("No customers found matching your search."),
            TableState::Rows => None,
        }
    }
}

// ─────────────────────────────────────────
// Products / inventory
// ─────────────────────────────────────────

pub struct ProductTable {
    rows: Vec<Product>,
    pub search: String,
    /// None = all categories.
    pub category: Option<String>,
    pub stock_level: StockLevelFilter,
}

impl ProductTable {
    pub fn new(rows: Vec<Product>) -> Self {
        Self {
            rows,
            search: String::new(),
            category: None,
            stock_level: StockLevelFilter::All,
        }
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn set_category(&mut self, category: Option<&str>) {
        self.category = category.map(String::from);
    }

    pub fn set_stock_level(&mut self, level: StockLevelFilter) {
        self.stock_level = level;
    }

    /// Distinct category values present in the source rows, for the dropdown.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .rows
            .iter()
            .filter_map(|p| p.category.as_deref())
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    pub fn visible(&self) -> Vec<&Product> {
        self.rows
            .iter()
            .filter(|p| {
                let matches_search = self.search.is_empty()
                    || contains_ci(&p.name, &self.search)
                    || opt_contains_ci(p.sku.as_deref(), &self.search)
                    || opt_contains_ci(p.description.as_deref(), &self.search);

                let matches_category = match &self.category {
                    None => true,
                    Some(cat) => p.category.as_deref() == Some(cat.as_str()),
                };

                matches_search && matches_category && self.stock_level.matches(p)
            })
            .collect()
    }

    pub fn state(&self) -> TableState {
        table_state(self.rows.len(), self.visible().len())
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        match self.state() {
            TableState::EmptySource => Some("No products added yet."),
            TableState::NoMatches => Some("No products found matching your filters."),
            TableState::Rows => None,
        }
    }
}

// ─────────────────────────────────────────
// Orders
// ─────────────────────────────────────────

pub struct OrderTable {
    rows: Vec<OrderWithCustomer>,
    pub search: String,
    /// None = all statuses.
    pub status: Option<String>,
}

impl OrderTable {
    pub fn new(rows: Vec<OrderWithCustomer>) -> Self {
        Self {
            rows,
            search: String::new(),
            status: None,
        }
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn set_status(&mut self, status: Option<&str>) {
        self.status = status.map(String::from);
    }

    /// Match on order number or the customer's name/email.
    pub fn visible(&self) -> Vec<&OrderWithCustomer> {
        self.rows
            .iter()
            .filter(|o| {
                let matches_search = self.search.is_empty()
                    || contains_ci(&o.order_number, &self.search)
                    || opt_contains_ci(o.customer_name.as_deref(), &self.search)
                    || opt_contains_ci(o.customer_email.as_deref(), &self.search);

                let matches_status = match &self.status {
                    None => true,
                    Some(status) => o.status == *status,
                };

                matches_search && matches_status
            })
            .collect()
    }

    pub fn state(&self) -> TableState {
        table_state(self.rows.len(), self.visible().len())
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        match self.state() {
            TableState::EmptySource => Some("No orders created yet."),
            TableState::NoMatches => Some("No orders found matching your filters."),
            TableState::Rows => None,
        }
    }
}

// ─────────────────────────────────────────
// Inventory transactions
// ─────────────────────────────────────────

pub struct TransactionTable {
    rows: Vec<InventoryTransactionWithProduct>,
    pub search: String,
    /// None = all transaction types.
    pub transaction_type: Option<String>,
}

impl TransactionTable {
    pub fn new(rows: Vec<InventoryTransactionWithProduct>) -> Self {
        Self {
            rows,
            search: String::new(),
            transaction_type: None,
        }
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn set_transaction_type(&mut self, transaction_type: Option<&str>) {
        self.transaction_type = transaction_type.map(String::from);
    }

    /// Match on product name/sku or the transaction notes.
    pub fn visible(&self) -> Vec<&InventoryTransactionWithProduct> {
        self.rows
            .iter()
            .filter(|t| {
                let matches_search = self.search.is_empty()
                    || contains_ci(&t.product_name, &self.search)
                    || opt_contains_ci(t.product_sku.as_deref(), &self.search)
                    || opt_contains_ci(t.notes.as_deref(), &self.search);

                let matches_type = match &self.transaction_type {
                    None => true,
                    Some(tt) => t.transaction_type == *tt,
                };

                matches_search && matches_type
            })
            .collect()
    }

    pub fn state(&self) -> TableState {
        table_state(self.rows.len(), self.visible().len())
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        match self.state() {
            TableState::EmptySource => Some("No inventory transactions recorded yet."),
            TableState::NoMatches => Some("No transactions found matching your filters."),
            TableState::Rows => None,
        }
    }
}
