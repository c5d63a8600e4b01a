//! ReputationEngine - technician metrics, business rules and audit trail
//!
//! Consumes lifecycle events from the order store and keeps one metrics record
//! per technician.
//!
//! # Event Handling
//!
//! ```text
//! on_status_changed / on_order_evaluated
//!     ├─ 1. Classify the event (unrecognized pairs → ignored)
//!     ├─ 2. Take the write lock (metrics and audit log together)
//!     ├─ 3. Clone the technician's metrics (unknown technician → ignored)
//!     ├─ 4. Apply counters, penalties and badges
//!     ├─ 5. Recompute completion rate, level and score
//!     ├─ 6. Stage BADGE_EARNED, primary entry, LEVEL_UP
//!     └─ 7. Commit metrics and staged entries in one step
//! ```
//!
//! Readers never see updated metrics without the matching audit entries.

use super::audit_log::AuditLog;
use super::rules::{business_rules, default_rules};
use super::scoring::{completion_rate, level_for, reputation_score};
use crate::orders::{LifecycleObserver, MAX_RATING, MIN_RATING};
use parking_lot::RwLock;
use serde_json::{Map, Value, json};
use shared::order::{LifecycleEvent, OrderEvaluated, OrderStatus, StatusChanged};
use shared::reputation::{
    AuditEvent, AuditEventType, Badge, MetricField, Penalty, PenaltyKind, ReputationLevel,
    StateBusinessRules, TechnicianMetrics,
};
use shared::util::now_millis;
use std::collections::HashMap;

/// Completed services that earn the STREAK badge
pub const STREAK_THRESHOLD: u32 = 10;
/// Ratings below this add an AVALIACAO_BAIXA penalty
pub const LOW_RATING_THRESHOLD: u8 = 3;
/// Average rating that earns the QUALIDADE badge
pub const QUALITY_MIN_AVERAGE: f64 = 4.8;
/// Reviews needed before QUALIDADE can be earned
pub const QUALITY_MIN_REVIEWS: u32 = 10;

const CANCELLATION_REASON: &str = "Pedido cancelado após aceitação";

#[derive(Debug, Default)]
struct ReputationState {
    technicians: HashMap<String, TechnicianMetrics>,
    audit: AuditLog,
}

/// Metric-affecting status changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusEffect {
    Accepted,
    Completed,
    /// Cancelled before the technician committed; audited, never penalized
    Withdrawn,
    /// Cancelled after acceptance
    Cancelled,
}

impl StatusEffect {
    fn classify(old: OrderStatus, new: OrderStatus) -> Option<Self> {
        use OrderStatus::*;
        match (old, new) {
            (Pending, Accepted) => Some(Self::Accepted),
            (InProgress, Completed) => Some(Self::Completed),
            (Pending, Cancelled) => Some(Self::Withdrawn),
            (Accepted | EnRoute | InProgress, Cancelled) => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Derived fields that moved during an update
struct Derived {
    rate_changed: bool,
    level_change: Option<(ReputationLevel, ReputationLevel)>,
    score_changed: bool,
}

/// Working copy of one technician's record plus staged audit entries
struct Update<'a> {
    order_id: &'a str,
    technician_id: &'a str,
    now: i64,
    metrics: TechnicianMetrics,
    entries: Vec<AuditEvent>,
}

impl<'a> Update<'a> {
    fn new(order_id: &'a str, technician_id: &'a str, metrics: TechnicianMetrics) -> Self {
        Self {
            order_id,
            technician_id,
            now: now_millis(),
            metrics,
            entries: Vec::new(),
        }
    }

    fn record(&mut self, event_type: AuditEventType, metadata: Value, affected: Vec<MetricField>) {
        let metadata = match metadata {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let entry = AuditEvent::new(
            self.order_id,
            self.technician_id,
            event_type,
            metadata,
            affected,
        )
        .at(self.now);
        self.entries.push(entry);
    }

    fn penalize(&mut self, kind: PenaltyKind, reason: String) -> Penalty {
        let penalty = Penalty {
            kind,
            timestamp: self.now,
            reason,
        };
        self.metrics.penalties.push(penalty.clone());
        penalty
    }

    /// Insert the badge and stage BADGE_EARNED; false if already held
    fn award(&mut self, badge: Badge) -> bool {
        if !self.metrics.badges.insert(badge) {
            return false;
        }
        self.record(
            AuditEventType::BadgeEarned,
            json!({ "badge": badge, "label": badge.label() }),
            vec![MetricField::Badges],
        );
        true
    }

    /// Recompute every derived field from the counters
    fn refresh_derived(&mut self) -> Derived {
        let old_rate = self.metrics.completion_rate;
        if let Some(rate) =
            completion_rate(self.metrics.completed_services, self.metrics.total_services)
        {
            self.metrics.completion_rate = rate;
        }

        let old_level = self.metrics.level;
        let new_level = level_for(self.metrics.completed_services);
        self.metrics.level = new_level;

        let old_score = self.metrics.reputation_score;
        self.metrics.reputation_score = reputation_score(&self.metrics, self.now);

        Derived {
            rate_changed: old_rate != self.metrics.completion_rate,
            level_change: (old_level != new_level).then_some((old_level, new_level)),
            score_changed: old_score != self.metrics.reputation_score,
        }
    }

    /// Stage the primary entry followed by LEVEL_UP when the level moved
    fn finish(
        &mut self,
        event_type: AuditEventType,
        metadata: Value,
        mut affected: Vec<MetricField>,
    ) {
        let derived = self.refresh_derived();
        if derived.rate_changed {
            affected.push(MetricField::CompletionRate);
        }
        if derived.score_changed {
            affected.push(MetricField::ReputationScore);
        }
        if derived.level_change.is_some() {
            affected.push(MetricField::Level);
        }
        self.record(event_type, metadata, affected);

        if let Some((old_level, new_level)) = derived.level_change {
            self.record(
                AuditEventType::LevelUp,
                json!({ "old_level": old_level, "new_level": new_level }),
                vec![MetricField::Level],
            );
        }
    }
}

/// Reputation engine
///
/// Metrics and the audit log share one lock so every update lands atomically.
#[derive(Debug, Default)]
pub struct ReputationEngine {
    state: RwLock<ReputationState>,
}

impl ReputationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a technician with baseline metrics
    ///
    /// Derived fields (completion rate, level, score) are recomputed from the
    /// baseline. Returns false if the technician is already known.
    pub fn register_technician(
        &self,
        technician_id: impl Into<String>,
        baseline: TechnicianMetrics,
    ) -> bool {
        let technician_id = technician_id.into();
        let mut state = self.state.write();
        if state.technicians.contains_key(&technician_id) {
            tracing::warn!(technician_id = %technician_id, "Technician already registered");
            return false;
        }

        let mut metrics = baseline;
        if let Some(rate) = completion_rate(metrics.completed_services, metrics.total_services) {
            metrics.completion_rate = rate;
        }
        metrics.level = level_for(metrics.completed_services);
        metrics.reputation_score = reputation_score(&metrics, now_millis());

        tracing::info!(
            technician_id = %technician_id,
            level = %metrics.level,
            score = metrics.reputation_score,
            "Technician registered"
        );
        state.technicians.insert(technician_id, metrics);
        true
    }

    /// Snapshot of a technician's metrics
    pub fn technician_metrics(&self, technician_id: &str) -> Option<TechnicianMetrics> {
        self.state.read().technicians.get(technician_id).cloned()
    }

    /// Registered technician ids, sorted
    pub fn technician_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.state.read().technicians.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Business rules for a technician; unknown technicians get novice defaults
    pub fn business_rules(&self, technician_id: &str) -> StateBusinessRules {
        self.state
            .read()
            .technicians
            .get(technician_id)
            .map(business_rules)
            .unwrap_or_else(default_rules)
    }

    /// Full audit trail, oldest first
    pub fn audit_log(&self) -> Vec<AuditEvent> {
        self.state.read().audit.entries().to_vec()
    }

    /// Audit entries of one technician, oldest first
    pub fn audit_log_for(&self, technician_id: &str) -> Vec<AuditEvent> {
        self.state
            .read()
            .audit
            .for_technician(technician_id)
            .cloned()
            .collect()
    }

    /// Newest `limit` audit entries, newest first
    pub fn recent_audit(&self, limit: usize) -> Vec<AuditEvent> {
        self.state.read().audit.recent(limit)
    }

    pub fn audit_len(&self) -> usize {
        self.state.read().audit.len()
    }

    /// Apply a status change
    ///
    /// | Change | Metrics | Audit |
    /// |---|---|---|
    /// | PENDING → ACCEPTED | `total_services` + 1 | ORDER_ACCEPTED |
    /// | IN_PROGRESS → COMPLETED | `completed_services` + 1, STREAK at 10 | ORDER_COMPLETED (+ BADGE_EARNED) |
    /// | ACCEPTED / EN_ROUTE / IN_PROGRESS → CANCELLED | `cancelled_services` + 1, CANCELAMENTO penalty | PENALTY_APPLIED |
    /// | PENDING → CANCELLED | none | ORDER_CANCELLED |
    /// | anything else | none | none |
    ///
    /// PENDING → CANCELLED is the one change recorded without touching counters:
    /// the entry documents that an order left the technician's queue unpenalized,
    /// and its `affected_metrics` lists only derived fields that moved on refresh
    /// (usually none). Other counter-free changes (ACCEPTED → EN_ROUTE,
    /// COMPLETED → EVALUATED) write nothing; the rating arrives separately as
    /// `order-evaluated`.
    pub fn on_status_changed(&self, event: &StatusChanged) {
        let Some(effect) = StatusEffect::classify(event.old_status, event.new_status) else {
            return;
        };

        let mut state = self.state.write();
        let Some(metrics) = state.technicians.get(&event.technician_id).cloned() else {
            tracing::debug!(
                technician_id = %event.technician_id,
                order_id = %event.order_id,
                "Status change for unknown technician ignored"
            );
            return;
        };

        let mut update = Update::new(&event.order_id, &event.technician_id, metrics);
        let transition = json!({
            "old_status": event.old_status,
            "new_status": event.new_status,
        });

        match effect {
            StatusEffect::Accepted => {
                update.metrics.total_services = update.metrics.total_services.saturating_add(1);
                update.finish(
                    AuditEventType::OrderAccepted,
                    transition,
                    vec![MetricField::TotalServices],
                );
            }
            StatusEffect::Completed => {
                update.metrics.completed_services =
                    update.metrics.completed_services.saturating_add(1);
                let mut affected = vec![MetricField::CompletedServices];
                if update.metrics.completed_services >= STREAK_THRESHOLD
                    && update.award(Badge::Streak)
                {
                    affected.push(MetricField::Badges);
                }
                update.finish(AuditEventType::OrderCompleted, transition, affected);
            }
            StatusEffect::Withdrawn => {
                update.finish(AuditEventType::OrderCancelled, transition, Vec::new());
            }
            StatusEffect::Cancelled => {
                update.metrics.cancelled_services =
                    update.metrics.cancelled_services.saturating_add(1);
                let affected = vec![MetricField::CancelledServices, MetricField::Penalties];
                let penalty =
                    update.penalize(PenaltyKind::Cancelamento, CANCELLATION_REASON.to_string());
                let metadata = json!({
                    "old_status": event.old_status,
                    "new_status": event.new_status,
                    "penalty": penalty,
                });
                update.finish(AuditEventType::PenaltyApplied, metadata, affected);
            }
        }

        tracing::info!(
            technician_id = %event.technician_id,
            order_id = %event.order_id,
            effect = ?effect,
            score = update.metrics.reputation_score,
            "Reputation updated"
        );
        let Update {
            metrics, entries, ..
        } = update;
        state.technicians.insert(event.technician_id.clone(), metrics);
        state.audit.append(entries);
    }

    /// Apply a client evaluation
    pub fn on_order_evaluated(&self, event: &OrderEvaluated) {
        if !(MIN_RATING..=MAX_RATING).contains(&event.rating) {
            tracing::warn!(
                order_id = %event.order_id,
                rating = event.rating,
                "Evaluation with out-of-range rating ignored"
            );
            return;
        }

        let mut state = self.state.write();
        let Some(metrics) = state.technicians.get(&event.technician_id).cloned() else {
            tracing::debug!(
                technician_id = %event.technician_id,
                order_id = %event.order_id,
                "Evaluation for unknown technician ignored"
            );
            return;
        };

        let mut update = Update::new(&event.order_id, &event.technician_id, metrics);
        let rating = f64::from(event.rating);
        let reviews = f64::from(update.metrics.total_reviews);
        update.metrics.average_rating =
            (update.metrics.average_rating * reviews + rating) / (reviews + 1.0);
        update.metrics.total_reviews = update.metrics.total_reviews.saturating_add(1);
        let mut affected = vec![MetricField::AverageRating, MetricField::TotalReviews];

        if event.rating < LOW_RATING_THRESHOLD {
            update.penalize(
                PenaltyKind::AvaliacaoBaixa,
                format!("Avaliação baixa: {} estrelas", event.rating),
            );
            affected.push(MetricField::Penalties);
        }

        if update.metrics.average_rating >= QUALITY_MIN_AVERAGE
            && update.metrics.total_reviews >= QUALITY_MIN_REVIEWS
            && update.award(Badge::Qualidade)
        {
            affected.push(MetricField::Badges);
        }

        let metadata = json!({
            "rating": event.rating,
            "comment": event.comment,
            "new_average": update.metrics.average_rating,
        });
        update.finish(AuditEventType::RatingGiven, metadata, affected);

        tracing::info!(
            technician_id = %event.technician_id,
            order_id = %event.order_id,
            rating = event.rating,
            average = update.metrics.average_rating,
            score = update.metrics.reputation_score,
            "Rating applied"
        );
        let Update {
            metrics, entries, ..
        } = update;
        state.technicians.insert(event.technician_id.clone(), metrics);
        state.audit.append(entries);
    }
}

impl LifecycleObserver for ReputationEngine {
    fn on_event(&self, event: &LifecycleEvent) {
        match event {
            LifecycleEvent::StatusChanged(e) => self.on_status_changed(e),
            LifecycleEvent::OrderEvaluated(e) => self.on_order_evaluated(e),
        }
    }
}
