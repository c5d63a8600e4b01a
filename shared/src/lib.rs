//! Shared types for the iFix core
//!
//! Domain types used by the lifecycle store, the reputation engine and any
//! external consumer: orders and their status history, lifecycle events,
//! technician metrics, business rules, audit records and error codes.

pub mod error;
pub mod order;
pub mod reputation;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use order::{LifecycleEvent, Order, OrderStatus};
pub use reputation::{AuditEvent, StateBusinessRules, TechnicianMetrics};
