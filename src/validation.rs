//! Input validation and sanitization module
//!
//! Centralized validation for:
//! - Customer input (names, emails, phone numbers)
//! - Financial data (amounts, quantities)
//! - Product attributes (names, SKUs)
//! - Free-text notes

use crate::config::get_config;

/// Validation result type
pub type ValidationResult = Result<(), String>;

/// Validate a customer name
/// - Length: 2-100 characters
/// - Allowed: letters, digits, spaces, basic punctuation
pub fn validate_name(name: &str) -> ValidationResult {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Name is required".into());
    }

    if trimmed.len() < 2 || trimmed.len() > 100 {
        return Err("Name must be 2-100 characters".into());
    }

    if !trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace() || ".-'&".contains(c))
    {
        return Err("Name may only contain letters, digits, spaces and .-'&".into());
    }

    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Ok(()); // email is optional
    }

    if trimmed.len() > 254 {
        return Err("Email is too long (max 254 characters)".into());
    }

    let parts: Vec<&str> = trimmed.split('@').collect();
    if parts.len() != 2 {
        return Err("Email format is not valid".into());
    }

    let (local, domain) = (parts[0], parts[1]);

    if local.is_empty() || local.len() > 64 {
        return Err("Email format is not valid".into());
    }

    if !domain.contains('.') {
        return Err("Email domain is not valid".into());
    }

    Ok(())
}

/// Validate phone number: 7-15 digits after stripping separators
pub fn validate_phone(phone: &str) -> ValidationResult {
    let trimmed = phone.trim();

    if trimmed.is_empty() {
        return Ok(()); // phone is optional
    }

    if !trimmed
        .chars()
        .all(|c| c.is_numeric() || "+-() ".contains(c))
    {
        return Err("Phone number contains invalid characters".into());
    }

    let digits = trimmed.chars().filter(|c| c.is_numeric()).count();

    if !(7..=15).contains(&digits) {
        return Err("Phone number must have 7-15 digits".into());
    }

    Ok(())
}

/// Validate monetary amount
pub fn validate_amount(amount: f64, min: Option<f64>, max: Option<f64>) -> ValidationResult {
    if amount.is_nan() || amount.is_infinite() {
        return Err("Amount is not valid".into());
    }

    let min_val = min.unwrap_or(0.0);
    let max_val = max.unwrap_or(1_000_000_000.0);

    if amount < min_val {
        return Err(format!("Amount must be at least {}", format_currency(min_val)));
    }

    if amount > max_val {
        return Err(format!("Amount must be at most {}", format_currency(max_val)));
    }

    Ok(())
}

/// Validate a (non-negative) quantity, e.g. stock levels
pub fn validate_quantity(qty: i64, min: Option<i64>, max: Option<i64>) -> ValidationResult {
    let min_val = min.unwrap_or(0);
    let max_val = max.unwrap_or(1_000_000);

    if qty < min_val {
        return Err(format!("Quantity must be at least {}", min_val));
    }

    if qty > max_val {
        return Err(format!("Quantity must be at most {}", max_val));
    }

    Ok(())
}

/// Validate product name
pub fn validate_product_name(name: &str) -> ValidationResult {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Product name is required".into());
    }

    if trimmed.len() < 2 || trimmed.len() > 200 {
        return Err("Product name must be 2-200 characters".into());
    }

    Ok(())
}

/// Validate SKU (Stock Keeping Unit)
pub fn validate_sku(sku: &str) -> ValidationResult {
    if sku.is_empty() {
        return Ok(()); // SKU is optional
    }

    let trimmed = sku.trim();

    if trimmed.len() > 50 {
        return Err("SKU must be at most 50 characters".into());
    }

    if !trimmed.chars().all(|c| c.is_alphanumeric() || "-_.".contains(c)) {
        return Err("SKU may only contain letters, digits and -_.".into());
    }

    Ok(())
}

/// Validate notes attached to orders or inventory transactions
pub fn validate_notes(notes: &str) -> ValidationResult {
    if notes.is_empty() {
        return Ok(()); // notes are optional
    }

    if notes.len() > 500 {
        return Err("Notes are too long (max 500 characters)".into());
    }

    Ok(())
}

/// Combined validation for creating or updating a customer
pub fn validate_customer_input(
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> ValidationResult {
    validate_name(name)?;

    if let Some(email) = email {
        validate_email(email)?;
    }

    if let Some(phone) = phone {
        validate_phone(phone)?;
    }

    Ok(())
}

/// Combined validation for creating or updating a product
pub fn validate_product_input(
    name: &str,
    price: f64,
    stock_quantity: i64,
    low_stock_threshold: i64,
    sku: Option<&str>,
) -> ValidationResult {
    validate_product_name(name)?;
    validate_amount(price, Some(0.0), None)?;
    validate_quantity(stock_quantity, None, None)?;
    validate_quantity(low_stock_threshold, None, None)?;

    if let Some(sku) = sku {
        validate_sku(sku)?;
    }

    Ok(())
}

/// Format an amount in the configured currency, e.g. "EGP 1,250.00".
///
/// Every surface that renders money goes through here; the currency code comes
/// from configuration, never from the individual view.
pub fn format_currency(amount: f64) -> String {
    let code = &get_config().currency.code;
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();
    let whole = abs.trunc() as i64;
    let cents = ((abs - abs.trunc()) * 100.0).round() as i64;

    // 100.0 cents means the rounding carried into the next whole unit
    let (whole, cents) = if cents >= 100 { (whole + 1, 0) } else { (whole, cents) };

    format!("{}{} {}.{:02}", sign, code, group_thousands(whole), cents)
}

/// Insert thousands separators into a non-negative integer
fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
