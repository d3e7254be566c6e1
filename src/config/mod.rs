// ==========================================
// Cycle Radar - configuration layer
// ==========================================
// Storage: config_kv table, global scope only
// ==========================================

pub mod analytics_config;
pub mod config_manager;
pub mod paths;

pub use analytics_config::{config_keys, AnalyticsConfig, AnalyticsConfigReader};
pub use config_manager::ConfigManager;
pub use paths::{default_db_path, resolve_db_path};
