//! Append-only audit trail

use shared::reputation::{AuditEvent, AuditEventType};

/// Chronological audit trail, oldest first
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    entries: Vec<AuditEvent>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, events: impl IntoIterator<Item = AuditEvent>) {
        self.entries.extend(events);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[AuditEvent] {
        &self.entries
    }

    pub fn for_technician<'a>(
        &'a self,
        technician_id: &'a str,
    ) -> impl Iterator<Item = &'a AuditEvent> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.technician_id == technician_id)
    }

    pub fn for_order<'a>(&'a self, order_id: &'a str) -> impl Iterator<Item = &'a AuditEvent> + 'a {
        self.entries.iter().filter(move |e| e.order_id == order_id)
    }

    /// Newest `limit` entries, newest first
    pub fn recent(&self, limit: usize) -> Vec<AuditEvent> {
        self.entries.iter().rev().take(limit).cloned().collect()
    }

    pub fn count_of(&self, event_type: AuditEventType) -> usize {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }
}
