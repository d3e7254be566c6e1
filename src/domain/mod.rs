// ==========================================
// Cycle Radar - domain layer
// ==========================================
// Input records, derived metrics and report objects
// ==========================================

pub mod cycle;
pub mod metrics;
pub mod report;
pub mod types;

pub use cycle::{Addition, Cycle, DailyRecord};
pub use metrics::{CycleMetric, VarianceClassification};
pub use report::{
    Alert, BranchSummary, CycleDetail, CycleOverview, FleetSummary, KpiSnapshot,
};
pub use types::{AlertKind, CycleStatus, VarianceBucket};
