// ==========================================
// Cycle Radar - engine layer
// ==========================================
// Pure, stateless computations over an in-memory snapshot.
// Rule: engines never touch the data source.
// ==========================================

pub mod aggregator;
pub mod alert;
pub mod branch_rollup;
pub mod classifier;
pub mod fleet_summary;
pub mod kpi;
pub mod palette;

pub use aggregator::MetricAggregator;
pub use alert::{rank_alerts, AlertGenerator};
pub use branch_rollup::{BranchRollup, ClassifiedCycle};
pub use classifier::{variance_pct, VarianceClassifier};
pub use fleet_summary::FleetSummaryEngine;
pub use kpi::KpiEngine;
pub use palette::{BranchKeyMap, DEFAULT_BRANCH_PALETTE};
