// ==========================================
// Cycle Radar - SQLite connection setup
// ==========================================
// Goals:
// - every connection gets the same PRAGMA behaviour
// - analytics connections are query-only; the dataset is owned elsewhere
// ==========================================

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::time::Duration;

/// Default busy_timeout (ms)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// schema_version this code expects from the synced dataset.
///
/// Used for a warning only; no migration is ever attempted.
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Tables read by the analytics engine.
///
/// The synchronisation job owns this schema; it is kept here so tests and
/// local tooling can build compatible databases.
pub const REFERENCE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS config_kv (
    scope_id TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (scope_id, key)
);

CREATE TABLE IF NOT EXISTS rd_cycles (
    id INTEGER PRIMARY KEY,
    branch_id INTEGER NOT NULL,
    week_start TEXT NOT NULL,
    week_end TEXT NOT NULL,
    cancelled INTEGER NOT NULL DEFAULT 0,
    sent_at TEXT,
    completed_at TEXT
);

CREATE TABLE IF NOT EXISTS rd_daily_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cycle_id INTEGER NOT NULL,
    record_date TEXT,
    planned_quantity REAL,
    realized_quantity REAL,
    reference_cost REAL,
    realized_cost REAL,
    efficiency REAL
);

CREATE INDEX IF NOT EXISTS idx_rd_daily_records_cycle ON rd_daily_records(cycle_id);

CREATE TABLE IF NOT EXISTS rd_additions (
    id INTEGER PRIMARY KEY,
    cycle_id INTEGER NOT NULL,
    branch_id INTEGER,
    reason TEXT,
    description TEXT,
    detail_total_value REAL,
    requested_on TEXT,
    approved_at TEXT,
    cancelled_at TEXT
);
"#;

/// Apply the shared PRAGMAs to a connection
///
/// busy_timeout must be configured per connection.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a read-write connection (tooling and tests)
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Open a read-only connection for analytics
///
/// The file must exist; `query_only` also blocks writes through ATTACH.
pub fn open_readonly_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
    )?;
    configure_sqlite_connection(&conn)?;
    conn.execute_batch("PRAGMA query_only = ON;")?;
    Ok(conn)
}

/// Read schema_version (None when the table is absent)
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// Log a warning when the dataset schema differs from the expected one
pub fn warn_on_schema_mismatch(conn: &Connection) {
    match read_schema_version(conn) {
        Ok(Some(v)) if v == CURRENT_SCHEMA_VERSION => {}
        Ok(Some(v)) => tracing::warn!(
            found = v,
            expected = CURRENT_SCHEMA_VERSION,
            "dataset schema_version differs from the expected version"
        ),
        Ok(None) => tracing::warn!("dataset has no schema_version table"),
        Err(e) => tracing::warn!(error = %e, "unable to read schema_version"),
    }
}
