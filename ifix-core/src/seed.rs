//! Seed data - technicians and orders loaded at startup
//!
//! ```json
//! {
//!   "technicians": [{ "id": "tech-1", "metrics": { ... } }],
//!   "orders": [{ "id": "1", "current_status": "EN_ROUTE", ... }],
//!   "active_order": "1"
//! }
//! ```
//!
//! Orders go through `restore_order`, so a seed with an inconsistent history is
//! rejected instead of loaded.

use crate::marketplace::Marketplace;
use crate::orders::{ManagerError, Order, OrderStatus, StatusHistoryEntry, TechnicianRef};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::reputation::{Badge, TechnicianMetrics};
use shared::util::now_millis;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

const MINUTE_MILLIS: i64 = 60 * 1000;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Technician already registered: {0}")]
    DuplicateTechnician(String),

    #[error("Order rejected: {0}")]
    Order(#[from] ManagerError),

    #[error("Active order not found: {0}")]
    UnknownActiveOrder(String),
}

impl SeedError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SeedError::Io { .. } => ErrorCode::Unknown,
            SeedError::Json(_) => ErrorCode::ValidationFailed,
            SeedError::DuplicateTechnician(_) => ErrorCode::TechnicianAlreadyExists,
            SeedError::Order(e) => e.code(),
            SeedError::UnknownActiveOrder(_) => ErrorCode::OrderNotFound,
        }
    }
}

impl From<SeedError> for AppError {
    fn from(err: SeedError) -> Self {
        match err {
            SeedError::Order(e) => e.into(),
            SeedError::DuplicateTechnician(id) => AppError::with_message(
                ErrorCode::TechnicianAlreadyExists,
                format!("Technician already registered: {id}"),
            )
            .with_detail("technician_id", id),
            other => AppError::with_message(other.code(), other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedTechnician {
    pub id: String,
    pub metrics: TechnicianMetrics,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SeedData {
    #[serde(default)]
    pub technicians: Vec<SeedTechnician>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_order: Option<String>,
}

impl SeedData {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Sample technician `tech-1` with order `1` on its way
    pub fn demo() -> Self {
        let now = now_millis();
        let technician = TechnicianRef {
            id: "tech-1".to_string(),
            name: "Carlos Silva".to_string(),
            phone: "+55 (11) 98765-4321".to_string(),
            rating: 4.9,
            avatar: "👨‍🔧".to_string(),
        };

        let history = [
            (OrderStatus::Pending, 30),
            (OrderStatus::Accepted, 25),
            (OrderStatus::EnRoute, 10),
        ]
        .into_iter()
        .map(|(status, minutes_ago)| StatusHistoryEntry {
            status,
            timestamp: now - minutes_ago * MINUTE_MILLIS,
            message: Some(status.label().to_string()),
        })
        .collect();

        let order = Order {
            id: "1".to_string(),
            service: "Manutenção de computação".to_string(),
            technician,
            date: "Hoje, 16 Fev".to_string(),
            time: "15:00".to_string(),
            location: "Rua Exemplo, 123 - São Paulo, SP".to_string(),
            price: "R$ 80".to_string(),
            current_status: OrderStatus::EnRoute,
            status_history: history,
            estimated_arrival: Some(15),
            current_location: Some("Av. Paulista, 1000".to_string()),
            vehicle: Some("Moto Honda - ABC1234".to_string()),
        };

        let metrics = TechnicianMetrics {
            total_services: 85,
            completed_services: 80,
            cancelled_services: 2,
            average_rating: 4.9,
            total_reviews: 78,
            response_time: 5,
            punctuality_rate: 95.0,
            badges: BTreeSet::from([Badge::Pontual, Badge::Qualidade, Badge::Confiavel]),
            ..Default::default()
        };

        Self {
            technicians: vec![SeedTechnician {
                id: "tech-1".to_string(),
                metrics,
            }],
            orders: vec![order],
            active_order: Some("1".to_string()),
        }
    }

    /// Register technicians, restore orders and set the active cursor
    ///
    /// Stops at the first rejected record; records loaded before it stay loaded.
    pub fn load_into(self, marketplace: &Marketplace) -> Result<(), SeedError> {
        let technicians = self.technicians.len();
        let orders = self.orders.len();

        for technician in self.technicians {
            if !marketplace.register_technician(technician.id.clone(), technician.metrics) {
                return Err(SeedError::DuplicateTechnician(technician.id));
            }
        }
        for order in self.orders {
            marketplace.orders().restore_order(order)?;
        }
        if let Some(active) = self.active_order
            && !marketplace.set_active_order(&active)
        {
            return Err(SeedError::UnknownActiveOrder(active));
        }

        tracing::info!(technicians, orders, "Seed data loaded");
        Ok(())
    }
}
