// ==========================================
// Cycle Radar - dashboard API
// ==========================================
// The in-process boundary consumed by the dashboard:
//   - compute_fleet_summary: assertiveness report, on demand
//   - list_cycles / get_cycle_detail: cycle views
//   - get_kpis: headline cards
//   - branch_keys: per-session branch -> colour map
// Every call reads a fresh snapshot; nothing is cached between calls.
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::config::analytics_config::{AnalyticsConfig, AnalyticsConfigReader};
use crate::config::config_manager::ConfigManager;
use crate::domain::report::{CycleDetail, CycleOverview, FleetSummary, KpiSnapshot};
use crate::domain::types::CycleStatus;
use crate::engine::aggregator::MetricAggregator;
use crate::engine::classifier::VarianceClassifier;
use crate::engine::fleet_summary::FleetSummaryEngine;
use crate::engine::kpi::KpiEngine;
use crate::engine::palette::{BranchKeyMap, DEFAULT_BRANCH_PALETTE};
use crate::repository::source::{CycleQuery, ProductionDataSource};
use crate::repository::sqlite_source::SqliteProductionSource;

/// Default page size of `list_cycles`
pub const DEFAULT_CYCLE_LIST_LIMIT: usize = 50;

// ==========================================
// DashboardApi
// ==========================================
pub struct DashboardApi {
    source: Arc<dyn ProductionDataSource>,
    config: AnalyticsConfig,
}

impl DashboardApi {
    pub fn new(source: Arc<dyn ProductionDataSource>, config: AnalyticsConfig) -> Self {
        Self { source, config }
    }

    /// Open a SQLite dataset read-only and load thresholds from its config_kv table
    pub async fn from_sqlite(db_path: &str) -> ApiResult<Self> {
        let source = SqliteProductionSource::open(db_path)?;
        let config = ConfigManager::from_connection(source.connection())
            .load_analytics_config()
            .await?;
        Ok(Self::new(Arc::new(source), config))
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Replace the thresholds used by subsequent calls
    pub fn with_config(mut self, config: AnalyticsConfig) -> Self {
        self.config = config;
        self
    }

    /// Compute the fleet assertiveness summary now
    ///
    /// # Rules
    /// - cancelled cycles are excluded
    /// - metrics always come from the daily records
    /// - any data source failure aborts the run; no partial summary
    pub async fn compute_fleet_summary(&self) -> ApiResult<FleetSummary> {
        tracing::info!("computing fleet summary");

        let query = CycleQuery {
            include_cancelled: false,
            ..CycleQuery::default()
        };
        let (cycles, records) = futures::try_join!(
            self.source.fetch_cycles(&query),
            self.source.fetch_daily_records(None),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "data source failed, fleet summary aborted");
            ApiError::from(e)
        })?;

        let summary = FleetSummaryEngine::new(&self.config).summarize(&cycles, &records);

        tracing::info!(
            cycles = cycles.len(),
            records = records.len(),
            analyzed = summary.analyzed_cycle_count,
            accuracy = summary.overall_accuracy_pct,
            alerts = summary.total_alert_count,
            "fleet summary ready"
        );
        Ok(summary)
    }

    /// Most recent cycles, cancelled included, with their metric
    ///
    /// # Parameters
    /// - branch_id: restrict to one branch
    /// - limit: page size, default 50
    pub async fn list_cycles(
        &self,
        branch_id: Option<i64>,
        limit: Option<usize>,
    ) -> ApiResult<Vec<CycleOverview>> {
        if limit == Some(0) {
            return Err(ApiError::InvalidInput("limit must be positive".to_string()));
        }

        let query = CycleQuery {
            include_cancelled: true,
            branch_id,
            limit: Some(limit.unwrap_or(DEFAULT_CYCLE_LIST_LIMIT)),
        };
        let (cycles, records) = futures::try_join!(
            self.source.fetch_cycles(&query),
            self.source.fetch_daily_records(None),
        )?;

        let mut metrics = MetricAggregator::new().aggregate_for_cycles(&cycles, &records);
        let overviews: Vec<CycleOverview> = cycles
            .into_iter()
            .map(|cycle| CycleOverview {
                status: CycleStatus::of(&cycle),
                metric: metrics.remove(&cycle.id),
                cycle,
            })
            .collect();

        tracing::info!(count = overviews.len(), "cycles listed");
        Ok(overviews)
    }

    /// One cycle with its daily records, additions and classification
    pub async fn get_cycle_detail(&self, cycle_id: i64) -> ApiResult<CycleDetail> {
        if cycle_id <= 0 {
            return Err(ApiError::InvalidInput(format!("cycle id {}", cycle_id)));
        }

        let cycle = self
            .source
            .fetch_cycle(cycle_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Cycle(id={})", cycle_id)))?;

        let (daily_records, additions) = futures::try_join!(
            self.source.fetch_daily_records(Some(cycle_id)),
            self.source.fetch_additions(Some(cycle_id)),
        )?;

        let metric = MetricAggregator::new().aggregate_cycle(&cycle, &daily_records);
        let classification = metric
            .as_ref()
            .map(|m| VarianceClassifier::new(self.config.tolerance_pct).classify(m));

        Ok(CycleDetail {
            overview: CycleOverview {
                status: CycleStatus::of(&cycle),
                cycle,
                metric,
            },
            classification,
            daily_records,
            additions,
        })
    }

    /// Headline KPIs over the whole dataset
    pub async fn get_kpis(&self) -> ApiResult<KpiSnapshot> {
        let all = CycleQuery::all();
        let (cycles, records, additions) = futures::try_join!(
            self.source.fetch_cycles(&all),
            self.source.fetch_daily_records(None),
            self.source.fetch_additions(None),
        )?;

        let kpis = KpiEngine::new().compute(&cycles, &records, &additions);
        tracing::info!(
            total_cycles = kpis.total_cycles,
            active_cycles = kpis.active_cycles,
            "kpis computed"
        );
        Ok(kpis)
    }

    /// Colour key per branch, in ranking order of the summary
    pub fn branch_keys(&self, summary: &FleetSummary) -> BranchKeyMap<&'static str> {
        BranchKeyMap::assign(
            summary.branches.iter().map(|b| b.branch_id),
            &DEFAULT_BRANCH_PALETTE,
        )
    }
}
