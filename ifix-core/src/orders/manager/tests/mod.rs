use super::*;
use parking_lot::Mutex;
use shared::order::TechnicianRef;

fn create_test_manager() -> OrdersManager {
    OrdersManager::new()
}

fn technician(id: &str) -> TechnicianRef {
    TechnicianRef {
        id: id.to_string(),
        name: "Carlos Silva".to_string(),
        phone: "+55 (11) 98765-4321".to_string(),
        rating: 4.9,
        avatar: String::new(),
    }
}

fn book_order(manager: &OrdersManager, order_id: &str, technician_id: &str) -> Order {
    manager
        .create_order(
            NewOrder::new("Manutenção de computação", technician(technician_id)).with_id(order_id),
        )
        .unwrap()
}

// ========================================================================
// Helper: walk the happy path until `target`
// ========================================================================

const HAPPY_PATH: [OrderStatus; 4] = [
    OrderStatus::Accepted,
    OrderStatus::EnRoute,
    OrderStatus::InProgress,
    OrderStatus::Completed,
];

fn drive_to(manager: &OrdersManager, order_id: &str, target: OrderStatus) {
    for status in HAPPY_PATH {
        let current = manager.get_order(order_id).unwrap().current_status;
        if current == target {
            return;
        }
        assert!(
            manager.transition(order_id, status, None),
            "transition to {status} failed"
        );
    }
    assert_eq!(manager.get_order(order_id).unwrap().current_status, target);
}

// ========================================================================
// Helper: observer that records every event it sees
// ========================================================================

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<LifecycleEvent>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().clone()
    }
}

impl LifecycleObserver for RecordingObserver {
    fn on_event(&self, event: &LifecycleEvent) {
        self.events.lock().push(event.clone());
    }
}

fn observed_manager() -> (OrdersManager, Arc<RecordingObserver>) {
    let manager = create_test_manager();
    let observer = Arc::new(RecordingObserver::default());
    manager.add_observer(observer.clone());
    (manager, observer)
}

fn assert_history_consistent(order: &Order) {
    assert!(!order.status_history.is_empty(), "history must not be empty");
    assert_eq!(
        order.status_history.last().unwrap().status,
        order.current_status,
        "last history entry must match current status"
    );
}

mod test_core;
