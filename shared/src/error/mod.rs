//! Unified error handling
//!
//! Every user-facing failure carries an [`ErrorCode`] plus a human-readable
//! message. Validation failures mutate nothing; store failures are caught at
//! the orchestrator level and surfaced as a single error per user action.

mod codes;
mod types;

pub use codes::ErrorCode;
pub use types::{AppError, AppResult};
