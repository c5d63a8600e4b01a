//! Business rules - eligibility and capacity tiers

use shared::reputation::{ReputationLevel, StateBusinessRules, TechnicianMetrics};

/// Score from which the top tier applies
pub const ELITE_SCORE: u32 = 800;
/// Score from which the trusted tier applies
pub const TRUSTED_SCORE: u32 = 600;
/// Minimum completion rate for a novice past the grace period
const NOVICE_MIN_COMPLETION: f64 = 80.0;
/// Services a novice may take regardless of completion rate
const NOVICE_GRACE_SERVICES: u32 = 5;
/// Minimum completion rate for the base tier
const BASE_MIN_COMPLETION: f64 = 70.0;

/// Rules for a technician with no metrics record
pub fn default_rules() -> StateBusinessRules {
    novice_rules(true)
}

/// Derive the business rules from the current metrics
///
/// First match wins: NOVATO level, then score tiers. A novice with a high score
/// still gets novice rules.
pub fn business_rules(metrics: &TechnicianMetrics) -> StateBusinessRules {
    if metrics.level == ReputationLevel::Novato {
        let can_accept = metrics.completion_rate >= NOVICE_MIN_COMPLETION
            || metrics.total_services < NOVICE_GRACE_SERVICES;
        return novice_rules(can_accept);
    }

    if metrics.reputation_score >= ELITE_SCORE {
        StateBusinessRules {
            can_accept_new_orders: true,
            max_concurrent_orders: 10,
            requires_deposit: false,
            priority_in_search: 10,
            cancellation_penalty: 20,
            auto_reject_time: 60,
        }
    } else if metrics.reputation_score >= TRUSTED_SCORE {
        StateBusinessRules {
            can_accept_new_orders: true,
            max_concurrent_orders: 5,
            requires_deposit: false,
            priority_in_search: 7,
            cancellation_penalty: 30,
            auto_reject_time: 45,
        }
    } else {
        StateBusinessRules {
            can_accept_new_orders: metrics.completion_rate >= BASE_MIN_COMPLETION,
            max_concurrent_orders: 3,
            requires_deposit: true,
            priority_in_search: 4,
            cancellation_penalty: 40,
            auto_reject_time: 30,
        }
    }
}

fn novice_rules(can_accept_new_orders: bool) -> StateBusinessRules {
    StateBusinessRules {
        can_accept_new_orders,
        max_concurrent_orders: 2,
        requires_deposit: true,
        priority_in_search: 3,
        cancellation_penalty: 50,
        auto_reject_time: 30,
    }
}
