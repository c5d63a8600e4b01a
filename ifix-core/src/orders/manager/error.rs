use shared::error::{AppError, ErrorCode};
use shared::order::OrderStatus;
use thiserror::Error;

/// Manager errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ManagerError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order already exists: {0}")]
    OrderAlreadyExists(String),

    #[error("Transition not allowed: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order is not completed: {0} ({1})")]
    OrderNotCompleted(String, OrderStatus),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Invalid order {0}: {1}")]
    InvalidOrder(String, String),
}

impl ManagerError {
    /// Error code for the caller (frontend localizes it)
    pub fn code(&self) -> ErrorCode {
        match self {
            ManagerError::OrderNotFound(_) => ErrorCode::OrderNotFound,
            ManagerError::OrderAlreadyExists(_) => ErrorCode::OrderAlreadyExists,
            ManagerError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            ManagerError::OrderNotCompleted(..) => ErrorCode::OrderNotCompleted,
            ManagerError::InvalidRating(_) => ErrorCode::InvalidRating,
            ManagerError::InvalidOrder(..) => ErrorCode::InvalidOrder,
        }
    }
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        let code = err.code();
        let message = err.to_string();
        let app = AppError::with_message(code, message);
        match err {
            ManagerError::OrderNotFound(id)
            | ManagerError::OrderAlreadyExists(id)
            | ManagerError::InvalidOrder(id, _) => app.with_detail("order_id", id),
            ManagerError::InvalidTransition { from, to } => app
                .with_detail("from", from.to_string())
                .with_detail("to", to.to_string()),
            ManagerError::OrderNotCompleted(id, status) => app
                .with_detail("order_id", id)
                .with_detail("status", status.to_string()),
            ManagerError::InvalidRating(rating) => app.with_detail("rating", rating),
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
