// ==========================================
// Cycle Radar - production data source trait
// ==========================================
// Read-only access to the external production dataset.
// Rule: data sources carry no business logic.
// ==========================================

use crate::domain::cycle::{Addition, Cycle, DailyRecord};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

/// Cycle listing filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleQuery {
    /// Include cancelled cycles
    pub include_cancelled: bool,
    /// Restrict to one branch
    pub branch_id: Option<i64>,
    /// Maximum number of rows (most recent first)
    pub limit: Option<usize>,
}

impl CycleQuery {
    /// Every cycle, cancelled included
    pub fn all() -> Self {
        Self {
            include_cancelled: true,
            branch_id: None,
            limit: None,
        }
    }

    /// Apply the filter to an in-memory list already ordered most recent first
    pub fn apply(&self, cycles: Vec<Cycle>) -> Vec<Cycle> {
        let filtered = cycles
            .into_iter()
            .filter(|c| self.include_cancelled || !c.cancelled)
            .filter(|c| self.branch_id.map_or(true, |b| c.branch_id == b));
        match self.limit {
            Some(limit) => filtered.take(limit).collect(),
            None => filtered.collect(),
        }
    }
}

/// Production dataset reader
///
/// Cycles come back ordered by `week_start` descending, then id descending.
/// Daily records come back ordered by date ascending, in stored order for
/// ties or missing dates.
#[async_trait]
pub trait ProductionDataSource: Send + Sync {
    async fn fetch_cycles(&self, query: &CycleQuery) -> RepositoryResult<Vec<Cycle>>;

    async fn fetch_cycle(&self, cycle_id: i64) -> RepositoryResult<Option<Cycle>>;

    /// All daily records, or those of one cycle
    async fn fetch_daily_records(&self, cycle_id: Option<i64>) -> RepositoryResult<Vec<DailyRecord>>;

    /// All additions, or those of one cycle
    async fn fetch_additions(&self, cycle_id: Option<i64>) -> RepositoryResult<Vec<Addition>>;
}

/// Ordering shared by every source: week_start DESC, id DESC
pub(crate) fn sort_cycles_recent_first(cycles: &mut [Cycle]) {
    cycles.sort_by(|a, b| {
        b.week_start
            .cmp(&a.week_start)
            .then_with(|| b.id.cmp(&a.id))
    });
}
