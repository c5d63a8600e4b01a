//! Audit events - immutable records of metric-affecting occurrences

use super::metrics::MetricField;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Audit event type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    OrderAccepted,
    OrderCancelled,
    OrderCompleted,
    RatingGiven,
    PenaltyApplied,
    BadgeEarned,
    LevelUp,
}

impl std::fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditEventType::OrderAccepted => write!(f, "ORDER_ACCEPTED"),
            AuditEventType::OrderCancelled => write!(f, "ORDER_CANCELLED"),
            AuditEventType::OrderCompleted => write!(f, "ORDER_COMPLETED"),
            AuditEventType::RatingGiven => write!(f, "RATING_GIVEN"),
            AuditEventType::PenaltyApplied => write!(f, "PENALTY_APPLIED"),
            AuditEventType::BadgeEarned => write!(f, "BADGE_EARNED"),
            AuditEventType::LevelUp => write!(f, "LEVEL_UP"),
        }
    }
}

/// Audit event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEvent {
    /// Unique ID
    pub id: String,
    pub order_id: String,
    pub technician_id: String,
    /// Unix milliseconds
    pub timestamp: i64,
    pub event_type: AuditEventType,
    /// Event-specific details
    pub metadata: Map<String, Value>,
    /// Metric fields changed by the occurrence
    pub affected_metrics: Vec<MetricField>,
}

impl AuditEvent {
    pub fn new(
        order_id: impl Into<String>,
        technician_id: impl Into<String>,
        event_type: AuditEventType,
        metadata: Map<String, Value>,
        affected_metrics: Vec<MetricField>,
    ) -> Self {
        Self {
            id: format!("audit_{}", uuid::Uuid::new_v4()),
            order_id: order_id.into(),
            technician_id: technician_id.into(),
            timestamp: crate::util::now_millis(),
            event_type,
            metadata,
            affected_metrics,
        }
    }

    /// Override the timestamp
    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn affects(&self, field: MetricField) -> bool {
        self.affected_metrics.contains(&field)
    }
}
