use super::*;

#[test]
fn test_create_order() {
    let manager = create_test_manager();
    let order = book_order(&manager, "1", "tech-1");

    assert_eq!(order.current_status, OrderStatus::Pending);
    assert_eq!(order.status_history.len(), 1);
    assert_eq!(
        order.status_history[0].message.as_deref(),
        Some(OrderStatus::Pending.label())
    );
    assert_eq!(manager.get_order("1").unwrap(), order);
    assert_eq!(manager.order_count(), 1);
}

#[test]
fn test_create_order_generates_id() {
    let manager = create_test_manager();
    let order = manager
        .create_order(NewOrder::new("Reparo de notebook", technician("tech-1")))
        .unwrap();

    assert!(!order.id.is_empty());
    assert!(manager.get_order(&order.id).is_some());
}

#[test]
fn test_duplicate_order_id_rejected() {
    let manager = create_test_manager();
    book_order(&manager, "1", "tech-1");

    let err = manager
        .create_order(NewOrder::new("Outro", technician("tech-2")).with_id("1"))
        .unwrap_err();
    assert_eq!(err, ManagerError::OrderAlreadyExists("1".to_string()));
    assert_eq!(manager.get_order("1").unwrap().technician.id, "tech-1");
}

#[test]
fn test_blank_order_id_rejected() {
    let manager = create_test_manager();
    let err = manager
        .create_order(NewOrder::new("Outro", technician("tech-1")).with_id("  "))
        .unwrap_err();
    assert!(matches!(err, ManagerError::InvalidOrder(..)));
    assert_eq!(manager.order_count(), 0);
}

#[test]
fn test_transition_appends_history_with_default_label() {
    let manager = create_test_manager();
    book_order(&manager, "1", "tech-1");

    assert!(manager.transition("1", OrderStatus::Accepted, None));

    let order = manager.get_order("1").unwrap();
    assert_eq!(order.current_status, OrderStatus::Accepted);
    assert_eq!(order.status_history.len(), 2);
    assert_eq!(
        order.status_history[1].message.as_deref(),
        Some("Confirmado")
    );
    assert_history_consistent(&order);
}

#[test]
fn test_transition_keeps_custom_message() {
    let manager = create_test_manager();
    book_order(&manager, "1", "tech-1");

    let order = manager
        .try_transition("1", OrderStatus::Accepted, Some("Técnico aceitou o serviço"))
        .unwrap();
    assert_eq!(
        order.last_entry().unwrap().message.as_deref(),
        Some("Técnico aceitou o serviço")
    );
}

#[test]
fn test_transition_emits_status_changed() {
    let (manager, observer) = observed_manager();
    book_order(&manager, "1", "tech-7");

    manager.transition("1", OrderStatus::Accepted, None);

    assert_eq!(
        observer.events(),
        vec![LifecycleEvent::StatusChanged(StatusChanged {
            order_id: "1".to_string(),
            technician_id: "tech-7".to_string(),
            old_status: OrderStatus::Pending,
            new_status: OrderStatus::Accepted,
        })]
    );
}

#[test]
fn test_create_order_emits_nothing() {
    let (manager, observer) = observed_manager();
    book_order(&manager, "1", "tech-1");
    assert!(observer.events().is_empty());
}

#[test]
fn test_invalid_transition_is_noop() {
    let (manager, observer) = observed_manager();
    book_order(&manager, "1", "tech-1");
    let before = manager.get_order("1").unwrap();

    let err = manager
        .try_transition("1", OrderStatus::Completed, None)
        .unwrap_err();

    assert_eq!(
        err,
        ManagerError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Completed,
        }
    );
    assert_eq!(manager.get_order("1").unwrap(), before);
    assert!(observer.events().is_empty());
}

#[test]
fn test_unknown_order() {
    let (manager, observer) = observed_manager();

    assert!(!manager.transition("missing", OrderStatus::Accepted, None));
    assert!(!manager.cancel("missing", None));
    assert!(!manager.evaluate("missing", 5, None));
    assert_eq!(
        manager.try_cancel("missing", None).unwrap_err(),
        ManagerError::OrderNotFound("missing".to_string())
    );
    assert!(observer.events().is_empty());
}

#[test]
fn test_can_transition_is_table_lookup() {
    assert!(OrdersManager::can_transition(
        OrderStatus::Pending,
        OrderStatus::Accepted
    ));
    assert!(OrdersManager::can_transition(
        OrderStatus::InProgress,
        OrderStatus::Cancelled
    ));
    assert!(!OrdersManager::can_transition(
        OrderStatus::Completed,
        OrderStatus::Cancelled
    ));
    assert!(!OrdersManager::can_transition(
        OrderStatus::Pending,
        OrderStatus::Completed
    ));
}

#[test]
fn test_possible_transitions() {
    let manager = create_test_manager();
    book_order(&manager, "1", "tech-1");

    assert_eq!(
        manager.possible_transitions("1").unwrap(),
        &[OrderStatus::Accepted, OrderStatus::Cancelled]
    );
    drive_to(&manager, "1", OrderStatus::Completed);
    assert_eq!(
        manager.possible_transitions("1").unwrap(),
        &[OrderStatus::Evaluated]
    );
    assert!(manager.possible_transitions("nope").is_err());
}

#[test]
fn test_active_order_cursor() {
    let manager = create_test_manager();
    book_order(&manager, "1", "tech-1");
    book_order(&manager, "2", "tech-1");

    assert!(manager.active_order().is_none());
    assert!(manager.set_active_order("2"));
    assert_eq!(manager.active_order().unwrap().id, "2");

    // Unknown id leaves the cursor where it was
    assert!(!manager.set_active_order("9"));
    assert_eq!(manager.active_order().unwrap().id, "2");

    // The cursor follows the live order, not a stale copy
    manager.transition("2", OrderStatus::Accepted, None);
    assert_eq!(
        manager.active_order().unwrap().current_status,
        OrderStatus::Accepted
    );
}

#[test]
fn test_list_orders_in_insertion_order() {
    let manager = create_test_manager();
    for id in ["c", "a", "b"] {
        book_order(&manager, id, "tech-1");
    }
    manager.cancel("a", None);

    let ids: Vec<String> = manager.list_orders().into_iter().map(|o| o.id).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn test_subscribe_receives_broadcast() {
    let manager = create_test_manager();
    let mut rx = manager.subscribe();
    book_order(&manager, "1", "tech-1");

    manager.transition("1", OrderStatus::Accepted, None);

    let event = rx.try_recv().unwrap();
    assert_eq!(event.order_id(), "1");
    assert_eq!(event.technician_id(), "tech-1");
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_closure_observer() {
    let manager = create_test_manager();
    let seen = Arc::new(Mutex::new(0usize));
    let counter = seen.clone();
    manager.add_observer(Arc::new(move |_: &LifecycleEvent| {
        *counter.lock() += 1;
    }));
    book_order(&manager, "1", "tech-1");

    manager.transition("1", OrderStatus::Accepted, None);
    manager.transition("1", OrderStatus::Completed, None);

    assert_eq!(*seen.lock(), 1);
}

#[test]
fn test_observer_can_query_store() {
    let manager = Arc::new(create_test_manager());
    book_order(&manager, "1", "tech-1");
    manager.set_active_order("1");

    let seen = Arc::new(Mutex::new(Vec::new()));
    let store = Arc::downgrade(&manager);
    let sink = seen.clone();
    manager.add_observer(Arc::new(move |event: &LifecycleEvent| {
        if let Some(store) = store.upgrade() {
            let status = store.get_order(event.order_id()).map(|o| o.current_status);
            let listed = store.list_orders().len();
            let active = store.active_order().map(|o| o.id);
            let _ = format!("{store:?}");
            sink.lock().push((status, listed, active));
        }
    }));

    let (done_tx, done_rx) = std::sync::mpsc::channel();
    let worker = manager.clone();
    std::thread::spawn(move || {
        let accepted = worker.transition("1", OrderStatus::Accepted, None);
        let _ = done_tx.send(accepted);
    });
    let accepted = done_rx
        .recv_timeout(std::time::Duration::from_secs(5))
        .expect("transition must return while an observer reads the store");
    assert!(accepted);

    assert_eq!(
        seen.lock().clone(),
        vec![(Some(OrderStatus::Accepted), 1, Some("1".to_string()))]
    );
}

#[test]
fn test_events_keep_commit_order_across_threads() {
    let (manager, observer) = observed_manager();
    let manager = Arc::new(manager);
    for i in 0..8 {
        book_order(&manager, &format!("o{i}"), "tech-1");
    }

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let manager = manager.clone();
            std::thread::spawn(move || {
                let id = format!("o{i}");
                for status in HAPPY_PATH {
                    assert!(manager.transition(&id, status, None));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Per order, observed statuses follow the happy path exactly
    for i in 0..8 {
        let id = format!("o{i}");
        let statuses: Vec<_> = observer
            .events()
            .into_iter()
            .filter_map(|e| match e {
                LifecycleEvent::StatusChanged(c) if c.order_id == id => Some(c.new_status),
                _ => None,
            })
            .collect();
        assert_eq!(statuses, HAPPY_PATH.to_vec());
    }
}

#[test]
fn test_manager_error_maps_to_app_error() {
    use shared::error::{AppError, ErrorCode};

    let err: AppError = ManagerError::InvalidTransition {
        from: OrderStatus::Evaluated,
        to: OrderStatus::Cancelled,
    }
    .into();
    assert_eq!(err.code, ErrorCode::InvalidTransition);
    let details = err.details.unwrap();
    assert_eq!(details["from"], "EVALUATED");
    assert_eq!(details["to"], "CANCELLED");

    let err: AppError = ManagerError::InvalidRating(9).into();
    assert_eq!(err.code, ErrorCode::InvalidRating);
}
