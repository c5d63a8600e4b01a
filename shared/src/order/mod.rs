//! Order Lifecycle Types
//!
//! This module provides types for the order lifecycle:
//! - Snapshots: Current order state and its status history
//! - Events: Facts emitted after every accepted transition or evaluation
//! - Types: Booking input and the technician reference

pub mod event;
pub mod snapshot;
pub mod types;

// Re-exports
pub use event::{LifecycleEvent, LifecycleEventType, OrderEvaluated, StatusChanged};
pub use snapshot::{Order, OrderStatus, StatusHistoryEntry};
pub use types::*;
