// ==========================================
// Cycle Radar - API layer
// ==========================================
// Rule: no analytics here, only orchestration of
// data source -> engine -> result
// ==========================================

pub mod dashboard_api;
pub mod error;

pub use dashboard_api::{DashboardApi, DEFAULT_CYCLE_LIST_LIMIT};
pub use error::{ApiError, ApiResult};
