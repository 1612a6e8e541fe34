pub mod commands;
pub mod config;
pub mod database;
pub mod errors;
pub mod logger;
pub mod models;
pub mod validation;
pub mod views;

use std::path::Path;

use sqlx::SqlitePool;

/// Shared application state handed to every command.
pub struct AppState {
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Bring the back office up: configuration, logger, then database.
///
/// The caller (desktop shell, HTTP server, test harness) owns the resulting
/// state and passes it to the command layer. Logger failures are downgraded to
/// a stderr warning so a read-only log directory does not block startup.
pub async fn bootstrap(app_data_dir: &Path) -> Result<AppState, String> {
    let config = config::init_config();

    if let Err(e) = logger::init_global_logger(app_data_dir) {
        eprintln!("Warning: failed to initialize logger: {}", e);
    }

    log_info!(
        "APP",
        "Application starting",
        serde_json::json!({
            "version": config.version,
            "environment": config.environment.as_str(),
            "app_data_dir": app_data_dir.to_string_lossy(),
        })
    );

    let pool = database::connection::init_db(app_data_dir)
        .await
        .map_err(|e| format!("Database initialization failed: {}", e))?;

    log_info!(
        "DATABASE",
        "Connection pool initialized",
        serde_json::json!({
            "pool_size": pool.size(),
        })
    );

    Ok(AppState::new(pool))
}
