use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Error: {0}")]
    Internal(String),
}

/// Commands surface flat strings at the boundary; workflow internals can use
/// `?` on `AppError` results thanks to this conversion.
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
