// ==========================================
// Cycle Radar - variance classifier
// ==========================================
// variance = (realized - planned) / planned * 100
//   |variance| <= tolerance  -> Assertive (boundary inclusive)
//   variance  >  tolerance   -> Deficit   (ran out)
//   variance  < -tolerance   -> Surplus   (waste)
// ==========================================

use crate::config::analytics_config::DEFAULT_TOLERANCE_PCT;
use crate::domain::metrics::{CycleMetric, VarianceClassification};
use crate::domain::types::VarianceBucket;

// ==========================================
// VarianceClassifier
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct VarianceClassifier {
    tolerance_pct: f64,
}

impl VarianceClassifier {
    pub fn new(tolerance_pct: f64) -> Self {
        Self { tolerance_pct }
    }

    pub fn tolerance_pct(&self) -> f64 {
        self.tolerance_pct
    }

    /// Classify one cycle metric
    ///
    /// Total over metrics produced by `MetricAggregator` (planned > 0).
    pub fn classify(&self, metric: &CycleMetric) -> VarianceClassification {
        let variance_pct = variance_pct(metric.total_planned, metric.total_realized);
        VarianceClassification {
            variance_pct,
            bucket: self.bucket_for(variance_pct),
        }
    }

    /// Bucket for a signed variance
    pub fn bucket_for(&self, variance_pct: f64) -> VarianceBucket {
        if variance_pct.abs() <= self.tolerance_pct {
            VarianceBucket::Assertive
        } else if variance_pct > self.tolerance_pct {
            VarianceBucket::Deficit
        } else {
            VarianceBucket::Surplus
        }
    }
}

impl Default for VarianceClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE_PCT)
    }
}

/// Signed percentage deviation of realized from planned
///
/// Scaled before dividing so whole-meal inputs give exact percentages.
pub fn variance_pct(planned: f64, realized: f64) -> f64 {
    (realized - planned) * 100.0 / planned
}
