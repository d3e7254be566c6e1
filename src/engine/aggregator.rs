// ==========================================
// Cycle Radar - metric aggregator
// ==========================================
// Input: daily records (any order, any cycles)
// Output: cycle_id -> CycleMetric
// Rule: a cycle whose planned total is 0 gets no metric at all
// ==========================================

use crate::domain::cycle::{Cycle, DailyRecord};
use crate::domain::metrics::CycleMetric;
use std::collections::HashMap;

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    planned: f64,
    realized: f64,
    planned_cost: f64,
    realized_cost: f64,
    records: usize,
}

// ==========================================
// MetricAggregator
// ==========================================
pub struct MetricAggregator {
    // stateless
}

impl MetricAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// Reduce daily records to one metric per cycle
    ///
    /// Missing quantities count as 0. Groups with `total_planned == 0`
    /// ("cycle not started") are excluded, not zero-valued.
    pub fn aggregate(&self, records: &[DailyRecord]) -> HashMap<i64, CycleMetric> {
        let mut groups: HashMap<i64, Totals> = HashMap::new();
        for record in records {
            let totals = groups.entry(record.cycle_id).or_default();
            totals.planned += record.planned();
            totals.realized += record.realized();
            totals.planned_cost += record.planned_cost();
            totals.realized_cost += record.realized_cost();
            totals.records += 1;
        }

        let metrics: HashMap<i64, CycleMetric> = groups
            .into_iter()
            .filter_map(|(cycle_id, totals)| Self::build_metric(cycle_id, totals))
            .map(|m| (m.cycle_id, m))
            .collect();

        tracing::debug!(
            records = records.len(),
            cycles_with_data = metrics.len(),
            "daily records aggregated"
        );
        metrics
    }

    /// Aggregate and attach branch ids for the given cycles
    ///
    /// Metrics of cycles not in `cycles` are dropped.
    pub fn aggregate_for_cycles(
        &self,
        cycles: &[Cycle],
        records: &[DailyRecord],
    ) -> HashMap<i64, CycleMetric> {
        let mut metrics = self.aggregate(records);
        cycles
            .iter()
            .filter_map(|c| metrics.remove(&c.id).map(|m| (c.id, m.with_branch(c.branch_id))))
            .collect()
    }

    /// Metric of a single cycle's records (None when nothing was planned)
    pub fn aggregate_cycle(&self, cycle: &Cycle, records: &[DailyRecord]) -> Option<CycleMetric> {
        let own: Vec<DailyRecord> = records
            .iter()
            .filter(|r| r.cycle_id == cycle.id)
            .cloned()
            .collect();
        self.aggregate(&own)
            .remove(&cycle.id)
            .map(|m| m.with_branch(cycle.branch_id))
    }

    fn build_metric(cycle_id: i64, totals: Totals) -> Option<CycleMetric> {
        // overflow to infinity leaves no usable variance either
        if !totals.planned.is_finite() || !totals.realized.is_finite() || totals.planned <= 0.0 {
            return None;
        }

        let cost_per_realized_meal = if totals.realized > 0.0 {
            totals.realized_cost / totals.realized
        } else {
            0.0
        };

        Some(CycleMetric {
            cycle_id,
            branch_id: None,
            total_planned: totals.planned,
            total_realized: totals.realized,
            efficiency_pct: totals.realized * 100.0 / totals.planned,
            planned_cost: totals.planned_cost,
            realized_cost: totals.realized_cost,
            cost_per_realized_meal,
            record_count: totals.records,
        })
    }
}

impl Default for MetricAggregator {
    fn default() -> Self {
        Self::new()
    }
}
