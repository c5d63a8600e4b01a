//! Error system for the iFix core
//!
//! - [`ErrorCode`]: Standardized numeric error codes
//! - [`AppError`]: Error type carrying a code, a message and optional details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Reputation errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::InvalidTransition, "PENDING -> COMPLETED")
//!     .with_detail("order_id", "1");
//! assert_eq!(err.code, ErrorCode::InvalidTransition);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
