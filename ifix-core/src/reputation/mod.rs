//! Reputation Engine
//!
//! - `scoring`: score formula and level thresholds
//! - `rules`: business-rule tiers
//! - `audit_log`: append-only audit trail
//! - `engine`: per-technician state, event handlers, queries

pub mod audit_log;
pub mod engine;
pub mod rules;
pub mod scoring;

pub use audit_log::AuditLog;
pub use engine::{
    LOW_RATING_THRESHOLD, QUALITY_MIN_AVERAGE, QUALITY_MIN_REVIEWS, ReputationEngine,
    STREAK_THRESHOLD,
};
pub use rules::{business_rules, default_rules};
pub use scoring::{MAX_SCORE, PENALTY_WINDOW_DAYS, level_for, reputation_score};

// Re-export shared reputation types
pub use shared::reputation::{
    AuditEvent, AuditEventType, Badge, MetricField, Penalty, PenaltyKind, ReputationLevel,
    StateBusinessRules, TechnicianMetrics,
};
