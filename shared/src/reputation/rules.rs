//! Business rules derived from a technician's reputation

use serde::{Deserialize, Serialize};

/// Eligibility and capacity policy for one technician
///
/// Never stored: always derived from the current metrics. `auto_reject_time` is
/// surfaced to an external scheduler, nothing here enforces it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateBusinessRules {
    pub can_accept_new_orders: bool,
    pub max_concurrent_orders: u32,
    pub requires_deposit: bool,
    /// 1-10
    pub priority_in_search: u8,
    /// Points lost per cancellation
    pub cancellation_penalty: u32,
    /// Minutes before an unaccepted order is rejected
    pub auto_reject_time: u32,
}
