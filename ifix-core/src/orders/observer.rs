//! Observer seam between the lifecycle store and its consumers
//!
//! Observers are called synchronously, in emission order, after the order book
//! lock has been released. They may query the store freely. Issuing a command
//! (transition, cancel, evaluate) from inside `on_event` blocks forever, since
//! the emitting command still holds the store's emit lock.

use shared::order::LifecycleEvent;

/// In-process consumer of lifecycle events
pub trait LifecycleObserver: Send + Sync {
    /// Called once per emitted event
    fn on_event(&self, event: &LifecycleEvent);
}

impl<F> LifecycleObserver for F
where
    F: Fn(&LifecycleEvent) + Send + Sync,
{
    fn on_event(&self, event: &LifecycleEvent) {
        self(event)
    }
}
