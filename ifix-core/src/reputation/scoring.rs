//! Reputation scoring - pure derivations from a metrics record
//!
//! Uses `rust_decimal` so the weighted sum does not pick up binary float noise
//! before rounding (e.g. `(4.9 - 3) * 100` is exactly 190).

use rust_decimal::prelude::*;
use shared::reputation::{ReputationLevel, TechnicianMetrics};
use shared::util::DAY_MILLIS;

/// Score every technician starts from
const BASE_SCORE: i64 = 500;
/// Upper bound of the score
pub const MAX_SCORE: u32 = 1000;
/// Penalties older than this stop counting
pub const PENALTY_WINDOW_DAYS: i64 = 30;
/// Points per badge
const BADGE_POINTS: i64 = 50;
/// Points lost per recent penalty
const PENALTY_POINTS: i64 = 30;
/// Completed services counted towards the volume bonus
const VOLUME_BONUS_CAP: u32 = 100;

/// Level implied by the completed-service count
pub fn level_for(completed_services: u32) -> ReputationLevel {
    match completed_services {
        0..=20 => ReputationLevel::Novato,
        21..=50 => ReputationLevel::Experiente,
        51..=100 => ReputationLevel::Profissional,
        101..=200 => ReputationLevel::Especialista,
        _ => ReputationLevel::Master,
    }
}

/// `completed / total * 100`, or `None` when nothing was accepted yet
pub fn completion_rate(completed_services: u32, total_services: u32) -> Option<f64> {
    (total_services > 0)
        .then(|| f64::from(completed_services) / f64::from(total_services) * 100.0)
}

/// Penalties within the trailing window ending at `now`
pub fn recent_penalties(metrics: &TechnicianMetrics, now: i64) -> usize {
    metrics.penalties_since(now - PENALTY_WINDOW_DAYS * DAY_MILLIS)
}

/// Reputation score at `now`, clamped to `[0, 1000]`
///
/// ```text
/// 500
///   + (average_rating - 3) * 100
///   + completion_rate * 2
///   + punctuality_rate * 1.5
///   + badges * 50
///   - recent penalties * 30
///   + min(completed_services, 100)
/// ```
///
/// Rates and rating outside their documented ranges are clamped first.
pub fn reputation_score(metrics: &TechnicianMetrics, now: i64) -> u32 {
    let rating = to_decimal(metrics.average_rating, 5.0);
    let completion = to_decimal(metrics.completion_rate, 100.0);
    let punctuality = to_decimal(metrics.punctuality_rate, 100.0);
    let badges = Decimal::from(metrics.badges.len() as u64);
    let penalties = Decimal::from(recent_penalties(metrics, now) as u64);
    let volume = Decimal::from(metrics.completed_services.min(VOLUME_BONUS_CAP));

    let score = Decimal::from(BASE_SCORE)
        + (rating - Decimal::from(3)) * Decimal::ONE_HUNDRED
        + completion * Decimal::TWO
        + punctuality * Decimal::new(15, 1)
        + badges * Decimal::from(BADGE_POINTS)
        - penalties * Decimal::from(PENALTY_POINTS)
        + volume;

    score
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::ZERO, Decimal::from(MAX_SCORE))
        .to_u32()
        .unwrap_or(0)
}

/// Clamp into `[0, max]` and convert; non-finite values count as zero
fn to_decimal(value: f64, max: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value.clamp(0.0, max)).unwrap_or_default()
}
