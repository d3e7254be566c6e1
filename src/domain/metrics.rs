// ==========================================
// Cycle Radar - derived per-cycle metrics
// ==========================================
// Recomputed on every analysis run, never persisted.
// ==========================================

use crate::domain::types::VarianceBucket;
use serde::{Deserialize, Serialize};

/// Cycle-level totals aggregated from daily records
///
/// Only exists for cycles with at least one daily record and
/// `total_planned > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleMetric {
    pub cycle_id: i64,
    /// Filled in once the metric is joined to its cycle
    pub branch_id: Option<i64>,
    pub total_planned: f64,
    pub total_realized: f64,
    /// realized / planned * 100
    pub efficiency_pct: f64,
    /// Σ planned × reference cost
    pub planned_cost: f64,
    /// Σ realized cost
    pub realized_cost: f64,
    /// realized cost / realized meals (0 without realized meals)
    pub cost_per_realized_meal: f64,
    pub record_count: usize,
}

impl CycleMetric {
    /// Attach the owning branch
    pub fn with_branch(mut self, branch_id: i64) -> Self {
        self.branch_id = Some(branch_id);
        self
    }

    /// Meals missing against the plan (realized above planned)
    pub fn shortfall_meals(&self) -> f64 {
        (self.total_realized - self.total_planned).max(0.0)
    }

    /// Meals produced but not consumed (planned above realized)
    pub fn excess_meals(&self) -> f64 {
        (self.total_planned - self.total_realized).max(0.0)
    }
}

/// Variance classification of one cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceClassification {
    /// (realized - planned) / planned * 100, signed
    pub variance_pct: f64,
    pub bucket: VarianceBucket,
}

impl VarianceClassification {
    /// |variance|
    pub fn magnitude(&self) -> f64 {
        self.variance_pct.abs()
    }
}
