// ==========================================
// Cycle Radar - analytics thresholds
// ==========================================
// Defaults are the reference constants of the assertiveness model.
// A deployment may override them through config_kv.
// ==========================================

use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// ±5 percentage points is assertive
pub const DEFAULT_TOLERANCE_PCT: f64 = 5.0;

/// Surplus magnitude above which a Waste alert is raised
pub const DEFAULT_WASTE_ALERT_PCT: f64 = 10.0;

/// Currency per meal used to estimate waste cost
pub const DEFAULT_UNIT_MEAL_COST: f64 = 12.0;

/// Alerts kept in the fleet summary
pub const DEFAULT_ALERT_CAP: usize = 10;

/// Locale for alert messages
pub const DEFAULT_LOCALE: &str = "pt-BR";

// ==========================================
// config_kv keys
// ==========================================
pub mod config_keys {
    pub const TOLERANCE_PCT: &str = "assertiveness/tolerance_pct";
    pub const WASTE_ALERT_PCT: &str = "assertiveness/waste_alert_pct";
    pub const UNIT_MEAL_COST: &str = "assertiveness/unit_meal_cost";
    pub const ALERT_CAP: &str = "assertiveness/alert_cap";
    pub const LOCALE: &str = "radar/locale";
}

/// Thresholds and presentation settings of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub tolerance_pct: f64,
    pub waste_alert_pct: f64,
    pub unit_meal_cost: f64,
    pub alert_cap: usize,
    pub locale: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            tolerance_pct: DEFAULT_TOLERANCE_PCT,
            waste_alert_pct: DEFAULT_WASTE_ALERT_PCT,
            unit_meal_cost: DEFAULT_UNIT_MEAL_COST,
            alert_cap: DEFAULT_ALERT_CAP,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl AnalyticsConfig {
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_string();
        self
    }
}

// ==========================================
// AnalyticsConfigReader trait
// ==========================================
// Implementor: ConfigManager (config_kv table)
#[async_trait]
pub trait AnalyticsConfigReader: Send + Sync {
    /// Load the effective config; absent or invalid keys keep their default
    async fn load_analytics_config(&self) -> RepositoryResult<AnalyticsConfig>;
}
