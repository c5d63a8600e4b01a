//! Error codes for the iFix core
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Reputation errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code enum
///
/// Represented as u16 values for compact serialization and for consumers
/// written in other languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order ID already in use
    OrderAlreadyExists = 4002,
    /// Target status not reachable from the current status
    InvalidTransition = 4003,
    /// Order must be completed before it can be rated
    OrderNotCompleted = 4004,
    /// Rating outside 1-5
    InvalidRating = 4005,
    /// Order record violates the lifecycle invariants
    InvalidOrder = 4006,

    // ==================== 5xxx: Reputation ====================
    /// Technician already registered
    TechnicianAlreadyExists = 5002,
}

impl ErrorCode {
    /// Numeric value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default English message
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",

            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyExists => "Order already exists",
            ErrorCode::InvalidTransition => "Status transition not allowed",
            ErrorCode::OrderNotCompleted => "Order is not completed",
            ErrorCode::InvalidRating => "Rating must be between 1 and 5",
            ErrorCode::InvalidOrder => "Order record is inconsistent",

            ErrorCode::TechnicianAlreadyExists => "Technician already registered",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderAlreadyExists),
            4003 => Ok(ErrorCode::InvalidTransition),
            4004 => Ok(ErrorCode::OrderNotCompleted),
            4005 => Ok(ErrorCode::InvalidRating),
            4006 => Ok(ErrorCode::InvalidOrder),

            // Reputation
            5002 => Ok(ErrorCode::TechnicianAlreadyExists),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
