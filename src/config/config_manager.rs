// ==========================================
// Cycle Radar - config manager
// ==========================================
// Storage: config_kv table (key-value + scope), read-only
// ==========================================

use crate::config::analytics_config::{config_keys, AnalyticsConfig, AnalyticsConfigReader};
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// Share an existing connection
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Read a value from config_kv (scope_id='global')
    ///
    /// # Returns
    /// - Some(String): value present
    /// - None: key absent, or no config_kv table at all
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        if !has_config_table(&conn)? {
            return Ok(None);
        }

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// All global values (for diagnostics)
    pub fn get_config_snapshot(&self) -> RepositoryResult<HashMap<String, String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let mut config_map = HashMap::new();
        if !has_config_table(&conn)? {
            return Ok(config_map);
        }

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }
        Ok(config_map)
    }

    fn parsed_or<T: FromStr>(&self, key: &str, default: T) -> RepositoryResult<T> {
        Ok(match self.get_global_config_value(key)? {
            Some(raw) => match raw.trim().parse::<T>() {
                Ok(v) => v,
                Err(_) => {
                    tracing::warn!(key, value = %raw, "unparseable config value, using default");
                    default
                }
            },
            None => default,
        })
    }
}

fn has_config_table(conn: &Connection) -> rusqlite::Result<bool> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='config_kv' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false))
}

#[async_trait]
impl AnalyticsConfigReader for ConfigManager {
    async fn load_analytics_config(&self) -> RepositoryResult<AnalyticsConfig> {
        let defaults = AnalyticsConfig::default();

        let mut cfg = AnalyticsConfig {
            tolerance_pct: self.parsed_or(config_keys::TOLERANCE_PCT, defaults.tolerance_pct)?,
            waste_alert_pct: self
                .parsed_or(config_keys::WASTE_ALERT_PCT, defaults.waste_alert_pct)?,
            unit_meal_cost: self.parsed_or(config_keys::UNIT_MEAL_COST, defaults.unit_meal_cost)?,
            alert_cap: self.parsed_or(config_keys::ALERT_CAP, defaults.alert_cap)?,
            locale: defaults.locale.clone(),
        };

        if let Some(locale) = self.get_global_config_value(config_keys::LOCALE)? {
            let locale = locale.trim();
            if !locale.is_empty() {
                cfg.locale = locale.to_string();
            }
        }

        // A negative band would classify nothing as assertive
        if cfg.tolerance_pct < 0.0 {
            tracing::warn!(value = cfg.tolerance_pct, "negative tolerance, using default");
            cfg.tolerance_pct = defaults.tolerance_pct;
        }

        tracing::debug!(?cfg, "analytics config loaded");
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::REFERENCE_SCHEMA;

    fn manager_with(values: &[(&str, &str)]) -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(REFERENCE_SCHEMA).unwrap();
        for (k, v) in values {
            conn.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
                params![k, v],
            )
            .unwrap();
        }
        ConfigManager::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[tokio::test]
    async fn test_defaults_without_overrides() {
        let cfg = manager_with(&[]).load_analytics_config().await.unwrap();
        assert_eq!(cfg, AnalyticsConfig::default());
    }

    #[tokio::test]
    async fn test_overrides_and_invalid_values() {
        let manager = manager_with(&[
            (config_keys::UNIT_MEAL_COST, "15.5"),
            (config_keys::ALERT_CAP, "not-a-number"),
            (config_keys::LOCALE, "en"),
        ]);
        let cfg = manager.load_analytics_config().await.unwrap();
        assert_eq!(cfg.unit_meal_cost, 15.5);
        assert_eq!(cfg.alert_cap, 10);
        assert_eq!(cfg.locale, "en");
        assert_eq!(cfg.tolerance_pct, 5.0);
    }

    #[tokio::test]
    async fn test_missing_config_table() {
        let conn = Connection::open_in_memory().unwrap();
        let manager = ConfigManager::from_connection(Arc::new(Mutex::new(conn)));
        let cfg = manager.load_analytics_config().await.unwrap();
        assert_eq!(cfg, AnalyticsConfig::default());
        assert!(manager.get_config_snapshot().unwrap().is_empty());
    }
}
