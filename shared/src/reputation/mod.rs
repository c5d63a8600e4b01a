//! Reputation Types
//!
//! - Metrics: per-technician counters, rates, badges, penalties, score and level
//! - Rules: business rules derived from the metrics
//! - Audit: immutable records of every metric-affecting occurrence

pub mod audit;
pub mod metrics;
pub mod rules;

// Re-exports
pub use audit::{AuditEvent, AuditEventType};
pub use metrics::{Badge, MetricField, Penalty, PenaltyKind, ReputationLevel, TechnicianMetrics};
pub use rules::StateBusinessRules;
