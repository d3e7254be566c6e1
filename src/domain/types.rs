// ==========================================
// Cycle Radar - domain type definitions
// ==========================================
// Accuracy buckets, alert kinds and cycle lifecycle states
// Serialization: SCREAMING_SNAKE_CASE (matches the dashboard contract)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Variance bucket
// ==========================================
// Signed variance = (realized - planned) / planned * 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VarianceBucket {
    Assertive, // within the tolerance band (inclusive)
    Deficit,   // realized above planned: under-provisioned, ran out
    Surplus,   // realized below planned: over-provisioned, waste
}

impl fmt::Display for VarianceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarianceBucket::Assertive => write!(f, "ASSERTIVE"),
            VarianceBucket::Deficit => write!(f, "DEFICIT"),
            VarianceBucket::Surplus => write!(f, "SURPLUS"),
        }
    }
}

// ==========================================
// Alert kind
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    Rupture, // raised by Deficit cycles
    Waste,   // raised by significant Surplus cycles
}

impl AlertKind {
    /// Message key in the locale files
    pub fn message_key(&self) -> &'static str {
        match self {
            AlertKind::Rupture => "alert.rupture",
            AlertKind::Waste => "alert.waste",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::Rupture => write!(f, "RUPTURE"),
            AlertKind::Waste => write!(f, "WASTE"),
        }
    }
}

// ==========================================
// Cycle lifecycle status
// ==========================================
// Derived from the cancelled flag and the sent/completed timestamps;
// not used by the variance classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CycleStatus {
    Planning,   // purchase request not sent yet
    InProgress, // sent, production running
    Completed,  // closed
    Cancelled,
}

impl CycleStatus {
    pub fn of(cycle: &crate::domain::cycle::Cycle) -> Self {
        cycle.status()
    }
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleStatus::Planning => write!(f, "PLANNING"),
            CycleStatus::InProgress => write!(f, "IN_PROGRESS"),
            CycleStatus::Completed => write!(f, "COMPLETED"),
            CycleStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}
