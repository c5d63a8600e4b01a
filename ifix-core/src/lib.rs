//! iFix core - order lifecycle and technician reputation
//!
//! # Overview
//!
//! - **Order Lifecycle Store** (`orders`): validated status transitions,
//!   append-only history, lifecycle event feed
//! - **Reputation Engine** (`reputation`): technician metrics, score, level,
//!   badges, penalties, business rules and the audit trail
//! - **Marketplace** (`marketplace`): wires the two together and exposes the
//!   query/command contract for the app layer
//!
//! # Module Layout
//!
//! ```text
//! ifix-core/src/
//! ├── orders/        # OrdersManager, observer seam
//! ├── reputation/    # scoring, rules, audit log, engine
//! ├── marketplace.rs # facade
//! ├── config.rs      # environment configuration
//! ├── logger.rs      # tracing setup
//! └── seed.rs        # seed data loading
//! ```

pub mod config;
pub mod logger;
pub mod marketplace;
pub mod orders;
pub mod reputation;
pub mod seed;

// Re-export public types
pub use config::Config;
pub use marketplace::{Marketplace, TechnicianProfile};
pub use orders::{LifecycleObserver, ManagerError, ManagerResult, OrdersManager};
pub use reputation::ReputationEngine;
pub use seed::{SeedData, SeedError};

// Re-export logger functions
pub use logger::{cleanup_old_logs, init_logger, init_logger_with_file};
