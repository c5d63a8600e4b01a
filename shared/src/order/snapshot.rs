//! Order snapshot - current state of a booked repair plus its status history
//!
//! `current_status` is only ever changed through the lifecycle store, which appends
//! a history entry in the same step. The last history entry therefore always
//! carries the current status.

use super::types::TechnicianRef;
use serde::{Deserialize, Serialize};

/// Order status
///
/// Happy path: `Pending → Accepted → EnRoute → InProgress → Completed → Evaluated`.
/// `Cancelled` is reachable from every non-terminal state before completion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Waiting for the technician to accept
    #[default]
    Pending,
    /// Technician accepted the job
    Accepted,
    /// Technician is on the way
    EnRoute,
    /// Technician is working on site
    InProgress,
    /// Work finished, waiting for the client's rating
    Completed,
    /// Client rated the service (terminal)
    Evaluated,
    /// Order cancelled (terminal)
    Cancelled,
}

/// Happy-path order used for timeline rendering
const TIMELINE: [OrderStatus; 6] = [
    OrderStatus::Pending,
    OrderStatus::Accepted,
    OrderStatus::EnRoute,
    OrderStatus::InProgress,
    OrderStatus::Completed,
    OrderStatus::Evaluated,
];

impl OrderStatus {
    /// Every status, in declaration order
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::EnRoute,
        OrderStatus::InProgress,
        OrderStatus::Completed,
        OrderStatus::Evaluated,
        OrderStatus::Cancelled,
    ];

    /// Statuses reachable from `self` in a single transition
    pub fn allowed_targets(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Accepted, OrderStatus::Cancelled],
            OrderStatus::Accepted => &[OrderStatus::EnRoute, OrderStatus::Cancelled],
            OrderStatus::EnRoute => &[OrderStatus::InProgress, OrderStatus::Cancelled],
            OrderStatus::InProgress => &[OrderStatus::Completed, OrderStatus::Cancelled],
            OrderStatus::Completed => &[OrderStatus::Evaluated],
            OrderStatus::Evaluated | OrderStatus::Cancelled => &[],
        }
    }

    /// Pure lookup in the transition table
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// No outgoing transitions
    pub fn is_terminal(self) -> bool {
        self.allowed_targets().is_empty()
    }

    /// Display label, also used as the default history message
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Aguardando Confirmação",
            OrderStatus::Accepted => "Confirmado",
            OrderStatus::EnRoute => "Técnico a Caminho",
            OrderStatus::InProgress => "Em Atendimento",
            OrderStatus::Completed => "Concluído",
            OrderStatus::Evaluated => "Avaliado",
            OrderStatus::Cancelled => "Cancelado",
        }
    }

    /// Position on the happy-path timeline (`None` for `Cancelled`)
    pub fn timeline_position(self) -> Option<usize> {
        TIMELINE.iter().position(|s| *s == self)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Accepted => write!(f, "ACCEPTED"),
            OrderStatus::EnRoute => write!(f, "EN_ROUTE"),
            OrderStatus::InProgress => write!(f, "IN_PROGRESS"),
            OrderStatus::Completed => write!(f, "COMPLETED"),
            OrderStatus::Evaluated => write!(f, "EVALUATED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// One entry of the append-only status history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusHistoryEntry {
    pub status: OrderStatus,
    /// Unix milliseconds
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Order snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Order ID
    pub id: String,
    /// Service description
    pub service: String,
    /// Technician snapshot taken at booking time
    pub technician: TechnicianRef,
    // Display strings, opaque to the lifecycle rules
    pub date: String,
    pub time: String,
    pub location: String,
    pub price: String,
    /// Current status
    pub current_status: OrderStatus,
    /// Status history, oldest first
    pub status_history: Vec<StatusHistoryEntry>,
    /// Estimated arrival in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_arrival: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
}

impl Order {
    /// Technician ID this order is bound to
    pub fn technician_id(&self) -> &str {
        &self.technician.id
    }

    /// Latest history entry
    pub fn last_entry(&self) -> Option<&StatusHistoryEntry> {
        self.status_history.last()
    }

    /// Estimated arrival, only meaningful while the technician is on the way
    pub fn eta_minutes(&self) -> Option<u32> {
        match self.current_status {
            OrderStatus::EnRoute => self.estimated_arrival,
            _ => None,
        }
    }

    /// History is non-empty and ends with the current status
    pub fn is_consistent(&self) -> bool {
        self.last_entry()
            .is_some_and(|entry| entry.status == self.current_status)
    }
}
