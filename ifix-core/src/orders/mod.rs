//! Order Lifecycle Module
//!
//! - **manager**: `OrdersManager`, the order store and its transition rules
//! - **observer**: `LifecycleObserver`, the seam consumers plug into
//!
//! # Architecture
//!
//! ```text
//! Command → OrdersManager → validate → apply → history
//!                 ↓
//!          LifecycleEvent
//!           ↙          ↘
//!   Observers        Broadcast
//!  (in-process)    (subscribers)
//! ```

pub mod manager;
pub mod observer;

// Re-exports
pub use manager::{
    DEFAULT_EVENT_CHANNEL_CAPACITY, MAX_RATING, MIN_RATING, ManagerError, ManagerResult,
    OrdersManager,
};
pub use observer::LifecycleObserver;

// Re-export shared types for convenience
pub use shared::order::{
    LifecycleEvent, NewOrder, Order, OrderEvaluated, OrderStatus, StatusChanged,
    StatusHistoryEntry, TechnicianRef,
};
