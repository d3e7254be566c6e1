// ==========================================
// Cycle Radar - branch rollup
// ==========================================
// Input: classified cycles (cycle, metric, classification)
// Output: one BranchSummary per branch, ranked by accuracy descending
// ==========================================

use crate::config::analytics_config::DEFAULT_UNIT_MEAL_COST;
use crate::domain::cycle::Cycle;
use crate::domain::metrics::{CycleMetric, VarianceClassification};
use crate::domain::report::BranchSummary;
use crate::domain::types::VarianceBucket;
use std::collections::HashMap;

/// One cycle after metric aggregation and classification
#[derive(Debug, Clone)]
pub struct ClassifiedCycle {
    pub cycle: Cycle,
    pub metric: CycleMetric,
    pub classification: VarianceClassification,
}

#[derive(Debug, Default)]
struct BranchAccumulator {
    cycles: u32,
    assertive: u32,
    deficits: u32,
    surpluses: u32,
    variance_sum: f64,
    waste_cost: f64,
}

// ==========================================
// BranchRollup
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct BranchRollup {
    unit_meal_cost: f64,
}

impl BranchRollup {
    pub fn new(unit_meal_cost: f64) -> Self {
        Self { unit_meal_cost }
    }

    /// Estimated waste cost of one cycle
    ///
    /// Only Surplus cycles waste: (planned - realized) × unit meal cost.
    pub fn waste_cost(&self, classified: &ClassifiedCycle) -> f64 {
        match classified.classification.bucket {
            VarianceBucket::Surplus => {
                (classified.metric.total_planned - classified.metric.total_realized)
                    * self.unit_meal_cost
            }
            VarianceBucket::Assertive | VarianceBucket::Deficit => 0.0,
        }
    }

    /// Group by branch and rank
    ///
    /// Branches tied on accuracy keep first-seen order.
    pub fn rollup(&self, classified: &[ClassifiedCycle]) -> Vec<BranchSummary> {
        let mut order: Vec<i64> = Vec::new();
        let mut accumulators: HashMap<i64, BranchAccumulator> = HashMap::new();

        for item in classified {
            let branch_id = item.cycle.branch_id;
            let acc = accumulators.entry(branch_id).or_insert_with(|| {
                order.push(branch_id);
                BranchAccumulator::default()
            });

            acc.cycles += 1;
            acc.variance_sum += item.classification.variance_pct;
            match item.classification.bucket {
                VarianceBucket::Assertive => acc.assertive += 1,
                VarianceBucket::Deficit => acc.deficits += 1,
                VarianceBucket::Surplus => acc.surpluses += 1,
            }
            acc.waste_cost += self.waste_cost(item);
        }

        let mut branches: Vec<BranchSummary> = order
            .into_iter()
            .filter_map(|branch_id| {
                accumulators
                    .remove(&branch_id)
                    .map(|acc| Self::summarize(branch_id, acc))
            })
            .collect();

        // sort_by is stable
        branches.sort_by(|a, b| b.accuracy_pct.total_cmp(&a.accuracy_pct));

        tracing::debug!(branches = branches.len(), "branch rollup complete");
        branches
    }

    fn summarize(branch_id: i64, acc: BranchAccumulator) -> BranchSummary {
        let (accuracy_pct, average_variance_pct) = if acc.cycles > 0 {
            (
                f64::from(acc.assertive) * 100.0 / f64::from(acc.cycles),
                acc.variance_sum / f64::from(acc.cycles),
            )
        } else {
            (0.0, 0.0)
        };

        BranchSummary {
            branch_id,
            total_cycles: acc.cycles,
            assertive_cycles: acc.assertive,
            accuracy_pct,
            deficit_count: acc.deficits,
            surplus_count: acc.surpluses,
            average_variance_pct,
            estimated_waste_cost: acc.waste_cost,
        }
    }
}

impl Default for BranchRollup {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT_MEAL_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::classifier::VarianceClassifier;
    use chrono::NaiveDate;

    fn classified(id: i64, branch_id: i64, planned: f64, realized: f64) -> ClassifiedCycle {
        let start = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        let metric = CycleMetric {
            cycle_id: id,
            branch_id: Some(branch_id),
            total_planned: planned,
            total_realized: realized,
            efficiency_pct: realized * 100.0 / planned,
            planned_cost: 0.0,
            realized_cost: 0.0,
            cost_per_realized_meal: 0.0,
            record_count: 5,
        };
        ClassifiedCycle {
            cycle: Cycle {
                id,
                branch_id,
                week_start: start,
                week_end: start + chrono::Duration::days(6),
                cancelled: false,
                sent_at: None,
                completed_at: None,
            },
            classification: VarianceClassifier::default().classify(&metric),
            metric,
        }
    }

    #[test]
    fn test_accuracy_three_of_four() {
        let cycles = vec![
            classified(1, 9, 100.0, 100.0),
            classified(2, 9, 100.0, 103.0),
            classified(3, 9, 100.0, 97.0),
            classified(4, 9, 100.0, 120.0),
        ];

        let branches = BranchRollup::default().rollup(&cycles);
        assert_eq!(branches.len(), 1);
        let b = &branches[0];
        assert_eq!(b.total_cycles, 4);
        assert_eq!(b.assertive_cycles, 3);
        assert_eq!(b.deficit_count, 1);
        assert_eq!(b.surplus_count, 0);
        assert_eq!(b.accuracy_pct, 75.0);
        assert_eq!(b.average_variance_pct, 5.0);
        assert_eq!(b.estimated_waste_cost, 0.0);
    }

    #[test]
    fn test_waste_cost_only_from_surplus() {
        let rollup = BranchRollup::default();
        let surplus = classified(1, 2, 200.0, 150.0);
        assert_eq!(rollup.waste_cost(&surplus), 600.0);

        // assertive cycle with a small excess wastes nothing
        let assertive = classified(2, 2, 100.0, 96.0);
        assert_eq!(rollup.waste_cost(&assertive), 0.0);

        let branches = rollup.rollup(&[surplus, assertive, classified(3, 2, 100.0, 130.0)]);
        assert_eq!(branches[0].estimated_waste_cost, 600.0);
        assert_eq!(branches[0].surplus_count, 1);
    }

    #[test]
    fn test_ranking_descending_by_accuracy() {
        let cycles = vec![
            classified(1, 10, 100.0, 150.0), // branch 10: 0%
            classified(2, 20, 100.0, 100.0), // branch 20: 100%
            classified(3, 30, 100.0, 100.0), // branch 30: 50%
            classified(4, 30, 100.0, 60.0),
        ];

        let branches = BranchRollup::default().rollup(&cycles);
        let ids: Vec<i64> = branches.iter().map(|b| b.branch_id).collect();
        assert_eq!(ids, vec![20, 30, 10]);
        for pair in branches.windows(2) {
            assert!(pair[0].accuracy_pct >= pair[1].accuracy_pct);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(BranchRollup::default().rollup(&[]).is_empty());
    }
}
