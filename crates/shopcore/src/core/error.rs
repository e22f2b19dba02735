use thiserror::Error;

use crate::pricing::PriceError;
use crate::shop::{QuoteError, SettingsError, TokenError};

/// Centralized error type for the shop.
///
/// Concern-specific errors convert into it with `?`, so callers that only need
/// to log or surface a failure can work with one type.
///
/// # Example
///
/// ```no_run
/// use shopcore::core::error::AppError;
///
/// fn report(err: AppError) {
///     log::error!("Shop error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Shop settings could not be loaded or failed validation
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Navigation token could not be encoded or decoded
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Price lookup failed
    #[error("Price error: {0}")]
    Price(#[from] PriceError),

    /// Price provider did not answer in time
    #[error("Price lookup timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Quote arithmetic rejected its inputs
    #[error("Quote error: {0}")]
    Quote(#[from] QuoteError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anyhow errors (for general error handling)
    #[error("Application error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
