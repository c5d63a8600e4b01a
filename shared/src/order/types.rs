//! Shared types for order booking

use serde::{Deserialize, Serialize};

// ============================================================================
// Technician Reference
// ============================================================================

/// Technician snapshot taken when the order is booked
///
/// Never updated afterwards: reputation changes live in the reputation engine,
/// not on the order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TechnicianRef {
    pub id: String,
    pub name: String,
    pub phone: String,
    /// Rating shown at booking time
    pub rating: f64,
    pub avatar: String,
}

// ============================================================================
// Order Input
// ============================================================================

/// Input for booking a new order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    /// Order ID (generated when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub service: String,
    pub technician: TechnicianRef,
    pub date: String,
    pub time: String,
    pub location: String,
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_arrival: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
}

impl NewOrder {
    /// Minimal booking with empty display fields
    pub fn new(service: impl Into<String>, technician: TechnicianRef) -> Self {
        Self {
            id: None,
            service: service.into(),
            technician,
            date: String::new(),
            time: String::new(),
            location: String::new(),
            price: String::new(),
            estimated_arrival: None,
            current_location: None,
            vehicle: None,
        }
    }

    /// Use a caller-chosen order ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
