//! Error code definitions

use serde::{Deserialize, Serialize};

/// Stable error codes for every failure the services can surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input failed validation (empty customer name, empty cart, ...)
    ValidationFailed,
    /// A referenced record does not exist
    NotFound,
    /// Product cannot be added to the cart
    OutOfStock,
    /// Remote store read/write rejected
    StoreUnavailable,
    /// Conditional write lost too many rounds (order counter contention)
    ConflictRetryExhausted,
    /// Local key-value cache failure
    CacheError,
    /// Print service rejected the document
    PrintError,
    /// No active session
    NotAuthenticated,
    /// Login record mismatch
    InvalidCredentials,
    /// Anything that should not happen
    InternalError,
}

impl ErrorCode {
    /// Default message for this code
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Not found",
            ErrorCode::OutOfStock => "Product not in stock",
            ErrorCode::StoreUnavailable => "Remote store unavailable",
            ErrorCode::ConflictRetryExhausted => "Too many concurrent updates",
            ErrorCode::CacheError => "Local cache error",
            ErrorCode::PrintError => "Print failed",
            ErrorCode::NotAuthenticated => "Not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::InternalError => "Internal error",
        }
    }

    /// String form used in logs and serialized errors
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::OutOfStock => "OUT_OF_STOCK",
            ErrorCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorCode::ConflictRetryExhausted => "CONFLICT_RETRY_EXHAUSTED",
            ErrorCode::CacheError => "CACHE_ERROR",
            ErrorCode::PrintError => "PRINT_ERROR",
            ErrorCode::NotAuthenticated => "NOT_AUTHENTICATED",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
