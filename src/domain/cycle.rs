// ==========================================
// Cycle Radar - input records
// ==========================================
// Read-only snapshot of the external production dataset:
// cycles, per-day planned/realized records, additions.
// This crate never mutates them.
// ==========================================

use crate::domain::types::CycleStatus;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// Cycle - one week of production planning for one branch
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    pub id: i64,
    pub branch_id: i64,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub cancelled: bool,
    pub sent_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
}

impl Cycle {
    /// Lifecycle status: cancelled > completed > sent > planning
    pub fn status(&self) -> CycleStatus {
        if self.cancelled {
            CycleStatus::Cancelled
        } else if self.completed_at.is_some() {
            CycleStatus::Completed
        } else if self.sent_at.is_some() {
            CycleStatus::InProgress
        } else {
            CycleStatus::Planning
        }
    }

    /// Cycle still open for production (not cancelled, not completed)
    pub fn is_active(&self) -> bool {
        !self.cancelled && self.completed_at.is_none()
    }

    /// Number of calendar days covered, both ends included
    pub fn duration_days(&self) -> i64 {
        (self.week_end - self.week_start).num_days() + 1
    }
}

// ==========================================
// DailyRecord - one calendar day of one cycle
// ==========================================
// Numeric fields are optional: a missing value counts as 0 everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub cycle_id: i64,
    pub record_date: Option<NaiveDate>,
    pub planned_quantity: Option<f64>,
    pub realized_quantity: Option<f64>,
    /// Currency per planned meal
    pub reference_cost: Option<f64>,
    pub realized_cost: Option<f64>,
    /// Efficiency reported by the source system (%)
    pub efficiency: Option<f64>,
}

impl DailyRecord {
    /// Minimal record with only quantities set
    pub fn new(cycle_id: i64, planned: f64, realized: f64) -> Self {
        Self {
            cycle_id,
            record_date: None,
            planned_quantity: Some(planned),
            realized_quantity: Some(realized),
            reference_cost: None,
            realized_cost: None,
            efficiency: None,
        }
    }

    /// Planned meals; missing or non-finite reads as 0
    pub fn planned(&self) -> f64 {
        finite_or_zero(self.planned_quantity)
    }

    /// Realized meals; missing or non-finite reads as 0
    pub fn realized(&self) -> f64 {
        finite_or_zero(self.realized_quantity)
    }

    /// planned × reference cost
    pub fn planned_cost(&self) -> f64 {
        self.planned() * finite_or_zero(self.reference_cost)
    }

    pub fn realized_cost(&self) -> f64 {
        finite_or_zero(self.realized_cost)
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

// ==========================================
// Addition - extra order placed against a cycle
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addition {
    pub id: i64,
    pub cycle_id: i64,
    pub branch_id: Option<i64>,
    pub reason: Option<String>,
    pub description: Option<String>,
    pub detail_total_value: Option<f64>,
    pub requested_on: Option<NaiveDate>,
    pub approved_at: Option<NaiveDateTime>,
    pub cancelled_at: Option<NaiveDateTime>,
}
