//! Technician metrics - per-technician reputation record

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Reputation tier, derived from completed services only
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReputationLevel {
    /// 0-20 completed services
    #[default]
    Novato,
    /// 21-50
    Experiente,
    /// 51-100
    Profissional,
    /// 101-200
    Especialista,
    /// More than 200
    Master,
}

impl ReputationLevel {
    pub fn label(self) -> &'static str {
        match self {
            ReputationLevel::Novato => "Novato",
            ReputationLevel::Experiente => "Experiente",
            ReputationLevel::Profissional => "Profissional",
            ReputationLevel::Especialista => "Especialista",
            ReputationLevel::Master => "Master",
        }
    }
}

impl std::fmt::Display for ReputationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReputationLevel::Novato => write!(f, "NOVATO"),
            ReputationLevel::Experiente => write!(f, "EXPERIENTE"),
            ReputationLevel::Profissional => write!(f, "PROFISSIONAL"),
            ReputationLevel::Especialista => write!(f, "ESPECIALISTA"),
            ReputationLevel::Master => write!(f, "MASTER"),
        }
    }
}

/// Earned achievement flag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Badge {
    /// 95%+ punctuality
    Pontual,
    /// Fast chat replies
    Comunicativo,
    /// 4.8+ stars over at least 10 reviews
    Qualidade,
    /// Low cancellation rate
    Confiavel,
    /// Short average service time
    Rapido,
    /// First client served
    PrimeiroAtendimento,
    /// 10+ completed services
    Streak,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::Pontual => "Sempre Pontual",
            Badge::Comunicativo => "Super Comunicativo",
            Badge::Qualidade => "Alta Qualidade",
            Badge::Confiavel => "Confiável",
            Badge::Rapido => "Atendimento Rápido",
            Badge::PrimeiroAtendimento => "Primeiro Cliente",
            Badge::Streak => "Sequência Perfeita",
        }
    }
}

/// Penalty kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PenaltyKind {
    Atraso,
    /// Cancellation after the technician committed
    Cancelamento,
    /// Rating below 3 stars
    AvaliacaoBaixa,
    SemResposta,
}

/// Timestamped penalty record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Penalty {
    #[serde(rename = "type")]
    pub kind: PenaltyKind,
    /// Unix milliseconds
    pub timestamp: i64,
    pub reason: String,
}

/// Metric field names, as listed in audit entries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MetricField {
    TotalServices,
    CompletedServices,
    CancelledServices,
    AverageRating,
    TotalReviews,
    CompletionRate,
    Badges,
    Penalties,
    ReputationScore,
    Level,
}

/// Technician metrics
///
/// `completion_rate`, `level` and `reputation_score` are derived fields. The
/// reputation engine recomputes them after every mutation; they are stored only
/// so a snapshot can be handed out without recomputation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TechnicianMetrics {
    pub total_services: u32,
    pub completed_services: u32,
    pub cancelled_services: u32,
    /// Weighted mean, 0-5
    pub average_rating: f64,
    pub total_reviews: u32,
    /// Minutes
    pub response_time: u32,
    /// 0-100
    pub punctuality_rate: f64,
    /// 0-100
    pub completion_rate: f64,
    #[serde(default)]
    pub badges: BTreeSet<Badge>,
    /// Append-only, oldest first
    #[serde(default)]
    pub penalties: Vec<Penalty>,
    /// 0-1000
    #[serde(default)]
    pub reputation_score: u32,
    #[serde(default)]
    pub level: ReputationLevel,
}

impl TechnicianMetrics {
    pub fn has_badge(&self, badge: Badge) -> bool {
        self.badges.contains(&badge)
    }

    /// Penalties stamped strictly after `since` (Unix milliseconds)
    pub fn penalties_since(&self, since: i64) -> usize {
        self.penalties.iter().filter(|p| p.timestamp > since).count()
    }
}
