// ==========================================
// Cycle Radar - fleet summary engine
// ==========================================
// Pipeline:
//   1. drop cancelled cycles
//   2. aggregate all daily records
//   3. classify every remaining cycle that has a metric
//   4. fleet counters and averages
//   5. fleet waste cost
//   6. alerts: collect, rank by date, cap
//   7. branch rollup
//   8. overall accuracy
// Pure: identical input gives an identical summary.
// ==========================================

use crate::config::analytics_config::AnalyticsConfig;
use crate::domain::cycle::{Cycle, DailyRecord};
use crate::domain::report::{Alert, FleetSummary};
use crate::domain::types::VarianceBucket;
use crate::engine::aggregator::MetricAggregator;
use crate::engine::alert::{rank_alerts, AlertGenerator};
use crate::engine::branch_rollup::{BranchRollup, ClassifiedCycle};
use crate::engine::classifier::VarianceClassifier;

// ==========================================
// FleetSummaryEngine
// ==========================================
pub struct FleetSummaryEngine {
    aggregator: MetricAggregator,
    classifier: VarianceClassifier,
    alert_generator: AlertGenerator,
    rollup: BranchRollup,
    alert_cap: usize,
}

impl FleetSummaryEngine {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            aggregator: MetricAggregator::new(),
            classifier: VarianceClassifier::new(config.tolerance_pct),
            alert_generator: AlertGenerator::new(config.waste_alert_pct, &config.locale),
            rollup: BranchRollup::new(config.unit_meal_cost),
            alert_cap: config.alert_cap,
        }
    }

    /// Steps 1-3: non-cancelled cycles with a metric, in input order
    pub fn classify_cycles(&self, cycles: &[Cycle], records: &[DailyRecord]) -> Vec<ClassifiedCycle> {
        let mut metrics = self.aggregator.aggregate(records);

        cycles
            .iter()
            .filter(|c| !c.cancelled)
            .filter_map(|cycle| {
                // a cycle id listed twice is only analyzed once
                metrics.remove(&cycle.id).map(|metric| {
                    let metric = metric.with_branch(cycle.branch_id);
                    let classification = self.classifier.classify(&metric);
                    ClassifiedCycle {
                        cycle: cycle.clone(),
                        metric,
                        classification,
                    }
                })
            })
            .collect()
    }

    /// Every alert of the classified cycles, most recent first, uncapped
    pub fn ranked_alerts(&self, classified: &[ClassifiedCycle]) -> Vec<Alert> {
        let alerts: Vec<Alert> = classified
            .iter()
            .filter_map(|c| {
                self.alert_generator
                    .generate(&c.cycle, &c.metric, &c.classification)
            })
            .collect();
        rank_alerts(alerts)
    }

    /// Full fleet summary
    pub fn summarize(&self, cycles: &[Cycle], records: &[DailyRecord]) -> FleetSummary {
        let classified = self.classify_cycles(cycles, records);
        if classified.is_empty() {
            tracing::debug!(cycles = cycles.len(), "no cycle with data, empty summary");
            return FleetSummary::empty();
        }

        let analyzed = count_u32(classified.len());
        let mut assertive = 0u32;
        let mut deficits = 0u32;
        let mut surpluses = 0u32;
        let mut deficit_sum = 0.0;
        let mut surplus_sum = 0.0;
        let mut waste_cost = 0.0;

        for item in &classified {
            match item.classification.bucket {
                VarianceBucket::Assertive => assertive += 1,
                VarianceBucket::Deficit => {
                    deficits += 1;
                    deficit_sum += item.classification.variance_pct;
                }
                VarianceBucket::Surplus => {
                    surpluses += 1;
                    // reported as a positive magnitude
                    surplus_sum += item.classification.variance_pct.abs();
                }
            }
            waste_cost += self.rollup.waste_cost(item);
        }

        let mut alerts = self.ranked_alerts(&classified);
        let total_alert_count = count_u32(alerts.len());
        alerts.truncate(self.alert_cap);

        let branches = self.rollup.rollup(&classified);

        let summary = FleetSummary {
            overall_accuracy_pct: f64::from(assertive) * 100.0 / f64::from(analyzed),
            analyzed_cycle_count: analyzed,
            assertive_cycle_count: assertive,
            total_deficits: deficits,
            average_deficit_pct: mean(deficit_sum, deficits),
            total_surpluses: surpluses,
            average_surplus_pct: mean(surplus_sum, surpluses),
            total_estimated_waste_cost: waste_cost,
            branches,
            alerts,
            total_alert_count,
        };

        tracing::debug!(
            analyzed,
            assertive,
            deficits,
            surpluses,
            alerts = total_alert_count,
            "fleet summary computed"
        );
        summary
    }
}

impl Default for FleetSummaryEngine {
    fn default() -> Self {
        Self::new(&AnalyticsConfig::default())
    }
}

/// Saturating usize -> u32 for report counters
pub(crate) fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn mean(sum: f64, count: u32) -> f64 {
    if count > 0 {
        sum / f64::from(count)
    } else {
        0.0
    }
}
