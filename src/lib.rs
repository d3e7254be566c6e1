// ==========================================
// Cycle Radar - core library
// ==========================================
// Assertiveness analytics for weekly meal-production cycles:
// planned vs realized, per cycle, per branch, fleet-wide.
// Read-only: the production dataset is never modified.
// ==========================================

rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// Modules
// ==========================================

// Domain - records and derived entities
pub mod domain;

// Data sources - SQLite dataset, CSV exports
pub mod repository;

// Engines - pure analytics
pub mod engine;

// Thresholds and paths
pub mod config;

// SQLite connection setup
pub mod db;

pub mod logging;

pub mod i18n;

// API - dashboard boundary
pub mod api;

// ==========================================
// Re-exports
// ==========================================

pub use domain::types::{AlertKind, CycleStatus, VarianceBucket};

pub use domain::{
    Addition, Alert, BranchSummary, Cycle, CycleDetail, CycleMetric, CycleOverview, DailyRecord,
    FleetSummary, KpiSnapshot, VarianceClassification,
};

pub use engine::{
    AlertGenerator, BranchKeyMap, BranchRollup, FleetSummaryEngine, KpiEngine, MetricAggregator,
    VarianceClassifier,
};

pub use repository::{CsvProductionSource, ProductionDataSource, SqliteProductionSource};

pub use config::AnalyticsConfig;

pub use api::{ApiError, DashboardApi};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Cycle Radar";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
