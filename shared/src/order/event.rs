//! Lifecycle events - facts emitted by the order store after a committed change
//!
//! The store emits exactly two kinds: a status change for every accepted
//! transition, and an evaluation when a completed order is rated.

use super::snapshot::OrderStatus;
use serde::{Deserialize, Serialize};

/// Event type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleEventType {
    StatusChanged,
    OrderEvaluated,
}

impl std::fmt::Display for LifecycleEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleEventType::StatusChanged => write!(f, "status-changed"),
            LifecycleEventType::OrderEvaluated => write!(f, "order-evaluated"),
        }
    }
}

/// Payload of `status-changed`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusChanged {
    pub order_id: String,
    pub technician_id: String,
    pub old_status: OrderStatus,
    pub new_status: OrderStatus,
}

/// Payload of `order-evaluated`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderEvaluated {
    pub order_id: String,
    pub technician_id: String,
    /// Stars, 1-5
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Lifecycle event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LifecycleEvent {
    StatusChanged(StatusChanged),
    OrderEvaluated(OrderEvaluated),
}

impl LifecycleEvent {
    pub fn event_type(&self) -> LifecycleEventType {
        match self {
            LifecycleEvent::StatusChanged(_) => LifecycleEventType::StatusChanged,
            LifecycleEvent::OrderEvaluated(_) => LifecycleEventType::OrderEvaluated,
        }
    }

    pub fn order_id(&self) -> &str {
        match self {
            LifecycleEvent::StatusChanged(e) => &e.order_id,
            LifecycleEvent::OrderEvaluated(e) => &e.order_id,
        }
    }

    pub fn technician_id(&self) -> &str {
        match self {
            LifecycleEvent::StatusChanged(e) => &e.technician_id,
            LifecycleEvent::OrderEvaluated(e) => &e.technician_id,
        }
    }
}

impl From<StatusChanged> for LifecycleEvent {
    fn from(event: StatusChanged) -> Self {
        LifecycleEvent::StatusChanged(event)
    }
}

impl From<OrderEvaluated> for LifecycleEvent {
    fn from(event: OrderEvaluated) -> Self {
        LifecycleEvent::OrderEvaluated(event)
    }
}
