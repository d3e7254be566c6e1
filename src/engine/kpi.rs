// ==========================================
// Cycle Radar - KPI engine
// ==========================================
// Headline cards: cycle counts, meal totals, average efficiency,
// average meal cost, additions
// ==========================================

use crate::domain::cycle::{Addition, Cycle, DailyRecord};
use crate::domain::report::KpiSnapshot;
use crate::engine::fleet_summary::count_u32;

pub struct KpiEngine {
    // stateless
}

impl KpiEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// Compute the KPI snapshot over the whole dataset
    ///
    /// # Rules
    /// - `total_cycles` counts every cycle, cancelled included
    /// - average efficiency: mean of positive per-day efficiencies,
    ///   else realized / planned over all records, else 0
    /// - average meal cost: mean of positive reference costs
    pub fn compute(
        &self,
        cycles: &[Cycle],
        records: &[DailyRecord],
        additions: &[Addition],
    ) -> KpiSnapshot {
        let total_planned: f64 = records.iter().map(|r| r.planned()).sum();
        let total_realized: f64 = records.iter().map(|r| r.realized()).sum();

        let efficiencies: Vec<f64> = records
            .iter()
            .filter_map(|r| r.efficiency)
            .filter(|e| e.is_finite() && *e > 0.0)
            .collect();
        let average_efficiency = if !efficiencies.is_empty() {
            efficiencies.iter().sum::<f64>() / efficiencies.len() as f64
        } else if total_planned > 0.0 {
            total_realized * 100.0 / total_planned
        } else {
            0.0
        };

        let costs: Vec<f64> = records
            .iter()
            .filter_map(|r| r.reference_cost)
            .filter(|c| c.is_finite() && *c > 0.0)
            .collect();
        let average_cost = if costs.is_empty() {
            0.0
        } else {
            costs.iter().sum::<f64>() / costs.len() as f64
        };

        KpiSnapshot {
            total_cycles: count_u32(cycles.len()),
            active_cycles: count_u32(cycles.iter().filter(|c| c.is_active()).count()),
            total_planned_meals: total_planned,
            total_realized_meals: total_realized,
            average_efficiency_pct: round_to(average_efficiency, 1),
            average_meal_cost: round_to(average_cost, 2),
            total_additions: count_u32(additions.len()),
            additions_value: additions
                .iter()
                .map(|a| a.detail_total_value.unwrap_or(0.0))
                .sum(),
        }
    }
}

impl Default for KpiEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cycle(id: i64, cancelled: bool, completed: bool) -> Cycle {
        let start = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        Cycle {
            id,
            branch_id: 1,
            week_start: start,
            week_end: start + chrono::Duration::days(6),
            cancelled,
            sent_at: None,
            completed_at: completed.then(|| start.and_hms_opt(18, 0, 0).unwrap()),
        }
    }

    fn addition(id: i64, value: Option<f64>) -> Addition {
        Addition {
            id,
            cycle_id: 1,
            branch_id: Some(1),
            reason: None,
            description: None,
            detail_total_value: value,
            requested_on: None,
            approved_at: None,
            cancelled_at: None,
        }
    }

    #[test]
    fn test_counts_and_totals() {
        let cycles = vec![cycle(1, false, false), cycle(2, true, false), cycle(3, false, true)];
        let mut r1 = DailyRecord::new(1, 100.0, 90.0);
        r1.efficiency = Some(90.0);
        r1.reference_cost = Some(11.5);
        let mut r2 = DailyRecord::new(1, 100.0, 95.0);
        r2.efficiency = Some(95.0);
        r2.reference_cost = Some(0.0);
        let mut r3 = DailyRecord::new(3, 50.0, 50.0);
        r3.efficiency = Some(0.0);
        r3.reference_cost = Some(12.25);

        let additions = vec![addition(1, Some(150.0)), addition(2, None)];
        let kpis = KpiEngine::new().compute(&cycles, &[r1, r2, r3], &additions);

        assert_eq!(kpis.total_cycles, 3);
        assert_eq!(kpis.active_cycles, 1);
        assert_eq!(kpis.total_planned_meals, 250.0);
        assert_eq!(kpis.total_realized_meals, 235.0);
        assert_eq!(kpis.average_efficiency_pct, 92.5);
        assert_eq!(kpis.average_meal_cost, 11.88);
        assert_eq!(kpis.total_additions, 2);
        assert_eq!(kpis.additions_value, 150.0);
    }

    #[test]
    fn test_efficiency_fallback_to_ratio() {
        let records = vec![DailyRecord::new(1, 300.0, 200.0)];
        let kpis = KpiEngine::new().compute(&[], &records, &[]);
        assert_eq!(kpis.average_efficiency_pct, 66.7);
        assert_eq!(kpis.average_meal_cost, 0.0);
    }

    #[test]
    fn test_empty_dataset() {
        let kpis = KpiEngine::new().compute(&[], &[], &[]);
        assert_eq!(kpis.total_cycles, 0);
        assert_eq!(kpis.average_efficiency_pct, 0.0);
        assert_eq!(kpis.additions_value, 0.0);
    }
}
