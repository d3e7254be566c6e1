// ==========================================
// Cycle Radar - SQLite production source
// ==========================================
// Tables: rd_cycles, rd_daily_records, rd_additions
// Connection is opened read-only; nothing here writes.
// ==========================================

use crate::db::{open_readonly_connection, warn_on_schema_mismatch};
use crate::domain::cycle::{Addition, Cycle, DailyRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::source::{CycleQuery, ProductionDataSource};
use async_trait::async_trait;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

const CYCLE_COLUMNS: &str =
    "id, branch_id, week_start, week_end, cancelled, sent_at, completed_at";

const RECORD_COLUMNS: &str = "cycle_id, record_date, planned_quantity, realized_quantity, \
     reference_cost, realized_cost, efficiency";

const ADDITION_COLUMNS: &str = "id, cycle_id, branch_id, reason, description, \
     detail_total_value, requested_on, approved_at, cancelled_at";

// ==========================================
// SqliteProductionSource
// ==========================================
pub struct SqliteProductionSource {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteProductionSource {
    /// Open the dataset file read-only
    ///
    /// Logs a warning when the schema version differs from the expected one.
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_readonly_connection(db_path)?;
        warn_on_schema_mismatch(&conn);
        tracing::info!(path = db_path, "production dataset opened read-only");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Wrap an existing connection (shared with the config reader or tests)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_cycle(row: &Row<'_>) -> rusqlite::Result<Cycle> {
        Ok(Cycle {
            id: row.get(0)?,
            branch_id: row.get(1)?,
            week_start: row.get(2)?,
            week_end: row.get(3)?,
            cancelled: row.get::<_, Option<i64>>(4)?.unwrap_or(0) != 0,
            sent_at: row.get(5)?,
            completed_at: row.get(6)?,
        })
    }

    fn map_record(row: &Row<'_>) -> rusqlite::Result<DailyRecord> {
        Ok(DailyRecord {
            cycle_id: row.get(0)?,
            record_date: row.get(1)?,
            planned_quantity: lenient_f64(row, 2)?,
            realized_quantity: lenient_f64(row, 3)?,
            reference_cost: lenient_f64(row, 4)?,
            realized_cost: lenient_f64(row, 5)?,
            efficiency: lenient_f64(row, 6)?,
        })
    }

    fn map_addition(row: &Row<'_>) -> rusqlite::Result<Addition> {
        Ok(Addition {
            id: row.get(0)?,
            cycle_id: row.get(1)?,
            branch_id: row.get(2)?,
            reason: row.get(3)?,
            description: row.get(4)?,
            detail_total_value: lenient_f64(row, 5)?,
            requested_on: row.get(6)?,
            approved_at: row.get(7)?,
            cancelled_at: row.get(8)?,
        })
    }
}

/// Numeric cell that tolerates malformed content
///
/// Integer and real values pass through; NULL, non-numeric text and
/// non-finite numbers read as None.
fn lenient_f64(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<f64>> {
    let value = match row.get_ref(idx)? {
        ValueRef::Integer(i) => Some(i as f64),
        ValueRef::Real(f) => Some(f),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

#[async_trait]
impl ProductionDataSource for SqliteProductionSource {
    async fn fetch_cycles(&self, query: &CycleQuery) -> RepositoryResult<Vec<Cycle>> {
        let conn = self.get_conn()?;
        // -1 means no limit in SQLite
        let limit = query
            .limit
            .map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
        let sql = format!(
            r#"
            SELECT {CYCLE_COLUMNS}
            FROM rd_cycles
            WHERE (?1 = 1 OR cancelled = 0)
              AND (?2 IS NULL OR branch_id = ?2)
            ORDER BY week_start DESC, id DESC
            LIMIT ?3
            "#
        );
        let mut stmt = conn.prepare(&sql)?;
        let cycles = stmt
            .query_map(
                params![query.include_cancelled, query.branch_id, limit],
                Self::map_cycle,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = cycles.len(), "cycles fetched");
        Ok(cycles)
    }

    async fn fetch_cycle(&self, cycle_id: i64) -> RepositoryResult<Option<Cycle>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {CYCLE_COLUMNS} FROM rd_cycles WHERE id = ?1");
        let cycle = conn
            .query_row(&sql, params![cycle_id], Self::map_cycle)
            .optional()?;
        Ok(cycle)
    }

    async fn fetch_daily_records(&self, cycle_id: Option<i64>) -> RepositoryResult<Vec<DailyRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM rd_daily_records
            WHERE (?1 IS NULL OR cycle_id = ?1)
            ORDER BY record_date ASC, id ASC
            "#
        );
        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![cycle_id], Self::map_record)?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = records.len(), "daily records fetched");
        Ok(records)
    }

    async fn fetch_additions(&self, cycle_id: Option<i64>) -> RepositoryResult<Vec<Addition>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT {ADDITION_COLUMNS}
            FROM rd_additions
            WHERE (?1 IS NULL OR cycle_id = ?1)
            ORDER BY id ASC
            "#
        );
        let mut stmt = conn.prepare(&sql)?;
        let additions = stmt
            .query_map(params![cycle_id], Self::map_addition)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(additions)
    }
}
