//! Marketplace - the in-process contract exposed to the app layer
//!
//! Wires the order store to the reputation engine and exposes the query and
//! command surface of both.
//!
//! ```text
//! Marketplace
//!     ├─ OrdersManager ── LifecycleEvent ──┬─▶ ReputationEngine (observer)
//!     │                                   └─▶ broadcast subscribers
//!     └─ Arc<ReputationEngine>
//! ```
//!
//! The engine never writes to the order store.

use crate::config::Config;
use crate::orders::{
    DEFAULT_EVENT_CHANNEL_CAPACITY, LifecycleEvent, LifecycleObserver, ManagerResult, NewOrder,
    Order, OrderStatus, OrdersManager,
};
use crate::reputation::ReputationEngine;
use serde::{Deserialize, Serialize};
use shared::reputation::{AuditEvent, StateBusinessRules, TechnicianMetrics};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Metrics together with the rules they imply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TechnicianProfile {
    pub technician_id: String,
    pub metrics: TechnicianMetrics,
    pub rules: StateBusinessRules,
}

#[derive(Debug)]
pub struct Marketplace {
    orders: OrdersManager,
    reputation: Arc<ReputationEngine>,
}

impl Default for Marketplace {
    fn default() -> Self {
        Self::new()
    }
}

impl Marketplace {
    pub fn new() -> Self {
        Self::with_channel_capacity(DEFAULT_EVENT_CHANNEL_CAPACITY)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_channel_capacity(config.event_channel_capacity)
    }

    pub fn with_channel_capacity(capacity: usize) -> Self {
        let orders = OrdersManager::with_channel_capacity(capacity);
        let reputation = Arc::new(ReputationEngine::new());
        orders.add_observer(reputation.clone());
        Self { orders, reputation }
    }

    pub fn orders(&self) -> &OrdersManager {
        &self.orders
    }

    pub fn reputation(&self) -> &ReputationEngine {
        &self.reputation
    }

    // ========== Queries ==========

    pub fn list_orders(&self) -> Vec<Order> {
        self.orders.list_orders()
    }

    pub fn get_order(&self, order_id: &str) -> Option<Order> {
        self.orders.get_order(order_id)
    }

    pub fn active_order(&self) -> Option<Order> {
        self.orders.active_order()
    }

    pub fn technician_metrics(&self, technician_id: &str) -> Option<TechnicianMetrics> {
        self.reputation.technician_metrics(technician_id)
    }

    pub fn business_rules(&self, technician_id: &str) -> StateBusinessRules {
        self.reputation.business_rules(technician_id)
    }

    pub fn audit_log(&self) -> Vec<AuditEvent> {
        self.reputation.audit_log()
    }

    pub fn possible_transitions(&self, order_id: &str) -> ManagerResult<&'static [OrderStatus]> {
        self.orders.possible_transitions(order_id)
    }

    pub fn technician_profile(&self, technician_id: &str) -> Option<TechnicianProfile> {
        let metrics = self.reputation.technician_metrics(technician_id)?;
        let rules = crate::reputation::business_rules(&metrics);
        Some(TechnicianProfile {
            technician_id: technician_id.to_string(),
            metrics,
            rules,
        })
    }

    // ========== Commands ==========

    pub fn transition(&self, order_id: &str, target: OrderStatus, message: Option<&str>) -> bool {
        self.orders.transition(order_id, target, message)
    }

    pub fn cancel(&self, order_id: &str, reason: Option<&str>) -> bool {
        self.orders.cancel(order_id, reason)
    }

    pub fn evaluate(&self, order_id: &str, rating: u8, comment: Option<&str>) -> bool {
        self.orders.evaluate(order_id, rating, comment)
    }

    pub fn set_active_order(&self, order_id: &str) -> bool {
        self.orders.set_active_order(order_id)
    }

    pub fn create_order(&self, input: NewOrder) -> ManagerResult<Order> {
        self.orders.create_order(input)
    }

    pub fn register_technician(
        &self,
        technician_id: impl Into<String>,
        baseline: TechnicianMetrics,
    ) -> bool {
        self.reputation.register_technician(technician_id, baseline)
    }

    // ========== Event feed ==========

    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.orders.subscribe()
    }

    pub fn add_observer(&self, observer: Arc<dyn LifecycleObserver>) {
        self.orders.add_observer(observer);
    }
}
