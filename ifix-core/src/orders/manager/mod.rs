//! OrdersManager - Order Lifecycle Store
//!
//! This module handles:
//! - Order creation and restore
//! - Transition validation against the fixed status table
//! - Append-only status history
//! - Event emission (observers + broadcast)
//!
//! # Transition Flow
//!
//! ```text
//! try_transition(order_id, target, message)
//!     ├─ 1. Take the emit lock (serializes all emitting commands)
//!     ├─ 2. Take the book write lock
//!     ├─ 3. Look up the order
//!     ├─ 4. Validate current → target against the table
//!     ├─ 5. Set status + append history entry
//!     ├─ 6. Release the book lock
//!     ├─ 7. Notify observers (synchronous, in order)
//!     ├─ 8. Broadcast to subscribers
//!     └─ 9. Release the emit lock, return the updated snapshot
//! ```
//!
//! Any failure before step 5 leaves the order, its history and the event feed
//! untouched. Observers run with the book unlocked, so they may query the
//! store; events still leave in commit order because the emit lock is held
//! from commit through delivery.

mod error;
pub use error::*;

use super::observer::LifecycleObserver;
use parking_lot::{Mutex, RwLock};
use shared::order::{
    LifecycleEvent, NewOrder, Order, OrderEvaluated, OrderStatus, StatusChanged,
    StatusHistoryEntry,
};
use shared::util::now_millis;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Default broadcast channel capacity for external subscribers
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Accepted rating range (stars)
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Order collection with insertion order and the active cursor
#[derive(Debug, Default)]
struct OrderBook {
    orders: HashMap<String, Order>,
    /// Insertion order, used for listing
    order_ids: Vec<String>,
    active_order_id: Option<String>,
}

impl OrderBook {
    fn insert(&mut self, order: Order) -> ManagerResult<()> {
        if self.orders.contains_key(&order.id) {
            return Err(ManagerError::OrderAlreadyExists(order.id));
        }
        self.order_ids.push(order.id.clone());
        self.orders.insert(order.id.clone(), order);
        Ok(())
    }

    /// Validate and apply one transition, returning the new snapshot and its event
    fn apply_transition(
        &mut self,
        order_id: &str,
        target: OrderStatus,
        message: Option<&str>,
    ) -> ManagerResult<(Order, StatusChanged)> {
        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))?;

        let old_status = order.current_status;
        if !OrdersManager::can_transition(old_status, target) {
            return Err(ManagerError::InvalidTransition {
                from: old_status,
                to: target,
            });
        }

        order.current_status = target;
        order.status_history.push(StatusHistoryEntry {
            status: target,
            timestamp: now_millis(),
            message: Some(message.unwrap_or(target.label()).to_string()),
        });

        let event = StatusChanged {
            order_id: order.id.clone(),
            technician_id: order.technician.id.clone(),
            old_status,
            new_status: target,
        };
        Ok((order.clone(), event))
    }

    /// Check evaluation preconditions, then move COMPLETED → EVALUATED
    fn apply_evaluation(
        &mut self,
        order_id: &str,
        rating: u8,
    ) -> ManagerResult<(Order, StatusChanged)> {
        let status = self
            .orders
            .get(order_id)
            .map(|o| o.current_status)
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))?;
        if status != OrderStatus::Completed {
            return Err(ManagerError::OrderNotCompleted(order_id.to_string(), status));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ManagerError::InvalidRating(rating));
        }
        let message = format!("rated {rating} stars");
        self.apply_transition(order_id, OrderStatus::Evaluated, Some(&message))
    }
}

/// OrdersManager for lifecycle commands and queries
pub struct OrdersManager {
    book: RwLock<OrderBook>,
    /// Held from commit through event delivery; always taken before `book`
    emit_lock: Mutex<()>,
    observers: RwLock<Vec<Arc<dyn LifecycleObserver>>>,
    event_tx: broadcast::Sender<LifecycleEvent>,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("orders", &self.book.read().orders.len())
            .field("observers", &self.observers.read().len())
            .field("event_tx", &"<broadcast::Sender>")
            .finish()
    }
}

impl Default for OrdersManager {
    fn default() -> Self {
        Self::new()
    }
}

impl OrdersManager {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_channel_capacity(DEFAULT_EVENT_CHANNEL_CAPACITY)
    }

    /// Create an empty store with a custom broadcast capacity
    pub fn with_channel_capacity(capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(capacity.max(1));
        Self {
            book: RwLock::new(OrderBook::default()),
            emit_lock: Mutex::new(()),
            observers: RwLock::new(Vec::new()),
            event_tx,
        }
    }

    /// Register an in-process observer
    ///
    /// Observers receive every event synchronously, in emission order.
    pub fn add_observer(&self, observer: Arc<dyn LifecycleObserver>) {
        self.observers.write().push(observer);
    }

    /// Subscribe to event broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.event_tx.subscribe()
    }

    /// Pure lookup in the transition table
    pub fn can_transition(current: OrderStatus, target: OrderStatus) -> bool {
        current.can_transition_to(target)
    }

    // ========== Commands ==========

    /// Book a new order in `PENDING` with a single history entry
    pub fn create_order(&self, input: NewOrder) -> ManagerResult<Order> {
        let id = match input.id {
            Some(id) if id.trim().is_empty() => {
                return Err(ManagerError::InvalidOrder(id, "empty order id".to_string()));
            }
            Some(id) => id,
            None => uuid::Uuid::new_v4().to_string(),
        };
        let status = OrderStatus::Pending;
        let order = Order {
            id,
            service: input.service,
            technician: input.technician,
            date: input.date,
            time: input.time,
            location: input.location,
            price: input.price,
            current_status: status,
            status_history: vec![StatusHistoryEntry {
                status,
                timestamp: now_millis(),
                message: Some(status.label().to_string()),
            }],
            estimated_arrival: input.estimated_arrival,
            current_location: input.current_location,
            vehicle: input.vehicle,
        };

        self.book.write().insert(order.clone())?;
        tracing::info!(
            order_id = %order.id,
            technician_id = %order.technician.id,
            "Order created"
        );
        Ok(order)
    }

    /// Re-hydrate an order kept by external storage
    ///
    /// The history must start at `PENDING`, follow the transition table and end
    /// at `current_status`. No events are emitted: the technician's metrics are
    /// expected to already reflect this history.
    pub fn restore_order(&self, order: Order) -> ManagerResult<()> {
        validate_history(&order)?;
        let order_id = order.id.clone();
        self.book.write().insert(order)?;
        tracing::debug!(order_id = %order_id, "Order restored");
        Ok(())
    }

    /// Move an order to `target`, returning the updated snapshot
    pub fn try_transition(
        &self,
        order_id: &str,
        target: OrderStatus,
        message: Option<&str>,
    ) -> ManagerResult<Order> {
        let _emit = self.emit_lock.lock();
        let (order, event) = self
            .book
            .write()
            .apply_transition(order_id, target, message)
            .inspect_err(|e| {
                tracing::warn!(order_id = %order_id, to = %target, error = %e, "Transition rejected")
            })?;

        tracing::info!(
            order_id = %order_id,
            technician_id = %event.technician_id,
            from = %event.old_status,
            to = %event.new_status,
            "Order status changed"
        );
        self.emit(vec![event.into()]);
        Ok(order)
    }

    /// Boolean form of [`Self::try_transition`]
    pub fn transition(&self, order_id: &str, target: OrderStatus, message: Option<&str>) -> bool {
        self.try_transition(order_id, target, message).is_ok()
    }

    /// Cancel an order
    pub fn try_cancel(&self, order_id: &str, reason: Option<&str>) -> ManagerResult<Order> {
        self.try_transition(order_id, OrderStatus::Cancelled, reason)
    }

    /// Boolean form of [`Self::try_cancel`]
    pub fn cancel(&self, order_id: &str, reason: Option<&str>) -> bool {
        self.try_cancel(order_id, reason).is_ok()
    }

    /// Rate a completed order
    ///
    /// Emits `status-changed` (COMPLETED → EVALUATED) followed by
    /// `order-evaluated`. Every precondition is checked before anything changes.
    pub fn try_evaluate(
        &self,
        order_id: &str,
        rating: u8,
        comment: Option<&str>,
    ) -> ManagerResult<Order> {
        let _emit = self.emit_lock.lock();
        let (order, changed) = self
            .book
            .write()
            .apply_evaluation(order_id, rating)
            .inspect_err(|e| {
                tracing::warn!(order_id = %order_id, rating, error = %e, "Evaluation rejected")
            })?;

        let evaluated = OrderEvaluated {
            order_id: changed.order_id.clone(),
            technician_id: changed.technician_id.clone(),
            rating,
            comment: comment.map(str::to_string),
        };
        tracing::info!(
            order_id = %order_id,
            technician_id = %evaluated.technician_id,
            rating,
            "Order evaluated"
        );
        self.emit(vec![changed.into(), evaluated.into()]);
        Ok(order)
    }

    /// Boolean form of [`Self::try_evaluate`]
    pub fn evaluate(&self, order_id: &str, rating: u8, comment: Option<&str>) -> bool {
        self.try_evaluate(order_id, rating, comment).is_ok()
    }

    /// Point the single-focus cursor at an order
    ///
    /// Returns false (cursor unchanged) when the order does not exist.
    pub fn set_active_order(&self, order_id: &str) -> bool {
        let mut book = self.book.write();
        if !book.orders.contains_key(order_id) {
            tracing::debug!(order_id = %order_id, "Active order not found");
            return false;
        }
        book.active_order_id = Some(order_id.to_string());
        true
    }

    // ========== Queries ==========

    /// Order under the cursor
    pub fn active_order(&self) -> Option<Order> {
        let book = self.book.read();
        book.active_order_id
            .as_ref()
            .and_then(|id| book.orders.get(id))
            .cloned()
    }

    /// Get an order snapshot
    pub fn get_order(&self, order_id: &str) -> Option<Order> {
        self.book.read().orders.get(order_id).cloned()
    }

    /// All orders, in insertion order (terminal ones included)
    pub fn list_orders(&self) -> Vec<Order> {
        let book = self.book.read();
        book.order_ids
            .iter()
            .filter_map(|id| book.orders.get(id))
            .cloned()
            .collect()
    }

    /// Statuses the order can move to next
    pub fn possible_transitions(&self, order_id: &str) -> ManagerResult<&'static [OrderStatus]> {
        self.book
            .read()
            .orders
            .get(order_id)
            .map(|o| o.current_status.allowed_targets())
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))
    }

    pub fn order_count(&self) -> usize {
        self.book.read().orders.len()
    }

    // ========== Event emission ==========

    /// Deliver events to observers, then to broadcast subscribers
    ///
    /// Caller holds `emit_lock` and not `book`.
    fn emit(&self, events: Vec<LifecycleEvent>) {
        let observers = self.observers.read().clone();
        for event in events {
            for observer in &observers {
                observer.on_event(&event);
            }
            if self.event_tx.send(event).is_err() {
                tracing::trace!("Event broadcast skipped: no active receivers");
            }
        }
    }
}

/// Check a restored order against the lifecycle invariants
fn validate_history(order: &Order) -> ManagerResult<()> {
    let invalid = |reason: &str| ManagerError::InvalidOrder(order.id.clone(), reason.to_string());

    if order.id.trim().is_empty() {
        return Err(invalid("empty order id"));
    }
    let first = order
        .status_history
        .first()
        .ok_or_else(|| invalid("empty status history"))?;
    if first.status != OrderStatus::Pending {
        return Err(invalid("history must start at PENDING"));
    }
    for pair in order.status_history.windows(2) {
        if !pair[0].status.can_transition_to(pair[1].status) {
            return Err(ManagerError::InvalidOrder(
                order.id.clone(),
                format!("illegal step {} -> {}", pair[0].status, pair[1].status),
            ));
        }
    }
    if !order.is_consistent() {
        return Err(invalid("last history entry differs from current status"));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
