// ==========================================
// Cycle Radar - report objects
// ==========================================
// Output structures consumed by presentation layers:
// alerts, branch ranking, fleet summary, KPI cards, cycle views
// ==========================================

use crate::domain::cycle::{Addition, Cycle, DailyRecord};
use crate::domain::metrics::{CycleMetric, VarianceClassification};
use crate::domain::types::{AlertKind, CycleStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Alert
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub branch_id: i64,
    pub cycle_id: i64,
    /// Localized, human readable
    pub message: String,
    /// Variance magnitude in % (always positive)
    pub magnitude: f64,
    /// Week start of the cycle
    pub occurred_on: NaiveDate,
}

// ==========================================
// BranchSummary - one row of the branch ranking
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchSummary {
    pub branch_id: i64,
    pub total_cycles: u32,
    pub assertive_cycles: u32,
    pub accuracy_pct: f64,
    pub deficit_count: u32,
    pub surplus_count: u32,
    /// Mean of the signed variances
    pub average_variance_pct: f64,
    pub estimated_waste_cost: f64,
}

// ==========================================
// FleetSummary - root output of the assertiveness engine
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub overall_accuracy_pct: f64,
    pub analyzed_cycle_count: u32,
    pub assertive_cycle_count: u32,

    pub total_deficits: u32,
    /// Mean signed variance of deficit cycles (positive)
    pub average_deficit_pct: f64,

    pub total_surpluses: u32,
    /// Mean absolute variance of surplus cycles (positive)
    pub average_surplus_pct: f64,

    pub total_estimated_waste_cost: f64,

    /// Ranked by accuracy, descending
    pub branches: Vec<BranchSummary>,

    /// Most recent first, capped
    pub alerts: Vec<Alert>,

    /// Alert count before the cap
    pub total_alert_count: u32,
}

impl FleetSummary {
    /// Summary of an empty dataset
    pub fn empty() -> Self {
        Self {
            overall_accuracy_pct: 0.0,
            analyzed_cycle_count: 0,
            assertive_cycle_count: 0,
            total_deficits: 0,
            average_deficit_pct: 0.0,
            total_surpluses: 0,
            average_surplus_pct: 0.0,
            total_estimated_waste_cost: 0.0,
            branches: Vec::new(),
            alerts: Vec::new(),
            total_alert_count: 0,
        }
    }

    pub fn branch(&self, branch_id: i64) -> Option<&BranchSummary> {
        self.branches.iter().find(|b| b.branch_id == branch_id)
    }
}

// ==========================================
// KpiSnapshot - headline cards
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub total_cycles: u32,
    pub active_cycles: u32,
    pub total_planned_meals: f64,
    pub total_realized_meals: f64,
    /// Rounded to 1 decimal
    pub average_efficiency_pct: f64,
    /// Rounded to 2 decimals
    pub average_meal_cost: f64,
    pub total_additions: u32,
    pub additions_value: f64,
}

// ==========================================
// Cycle views
// ==========================================

/// Cycle list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleOverview {
    pub cycle: Cycle,
    pub status: CycleStatus,
    pub metric: Option<CycleMetric>,
}

/// Single cycle drill-down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleDetail {
    pub overview: CycleOverview,
    pub classification: Option<VarianceClassification>,
    /// Ordered by date ascending
    pub daily_records: Vec<DailyRecord>,
    pub additions: Vec<Addition>,
}
