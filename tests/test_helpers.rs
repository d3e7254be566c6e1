// ==========================================
// Test helpers
// ==========================================
// Temporary SQLite datasets and CSV export directories
// ==========================================
#![allow(dead_code)]

use chrono::NaiveDate;
use cycle_radar::db::{CURRENT_SCHEMA_VERSION, REFERENCE_SCHEMA};
use rusqlite::{params, Connection};
use std::error::Error;
use std::path::Path;
use tempfile::NamedTempFile;

/// Create a temporary dataset with the reference schema
///
/// # Returns
/// - NamedTempFile: keep it alive for the duration of the test
/// - String: database path
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("non utf-8 temp path")?
        .to_string();

    let conn = Connection::open(&db_path)?;
    conn.execute_batch(REFERENCE_SCHEMA)?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        params![CURRENT_SCHEMA_VERSION],
    )?;

    Ok((temp_file, db_path))
}

/// Monday of week `n`, counting from 2025-01-06
pub fn monday(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap() + chrono::Duration::weeks(n)
}

pub fn insert_cycle(
    conn: &Connection,
    id: i64,
    branch_id: i64,
    week_start: NaiveDate,
    cancelled: bool,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO rd_cycles (id, branch_id, week_start, week_end, cancelled) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            id,
            branch_id,
            week_start.to_string(),
            (week_start + chrono::Duration::days(6)).to_string(),
            cancelled,
        ],
    )?;
    Ok(())
}

pub fn complete_cycle(conn: &Connection, id: i64, at: &str) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE rd_cycles SET sent_at = ?2, completed_at = ?2 WHERE id = ?1",
        params![id, at],
    )?;
    Ok(())
}

/// Insert one day with quantities only
pub fn insert_record(
    conn: &Connection,
    cycle_id: i64,
    record_date: NaiveDate,
    planned: Option<f64>,
    realized: Option<f64>,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO rd_daily_records (cycle_id, record_date, planned_quantity, realized_quantity) VALUES (?1, ?2, ?3, ?4)",
        params![cycle_id, record_date.to_string(), planned, realized],
    )?;
    Ok(())
}

/// Insert one day with costs and reported efficiency
pub fn insert_costed_record(
    conn: &Connection,
    cycle_id: i64,
    record_date: NaiveDate,
    planned: f64,
    realized: f64,
    reference_cost: f64,
    efficiency: f64,
) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        INSERT INTO rd_daily_records (
            cycle_id, record_date, planned_quantity, realized_quantity,
            reference_cost, realized_cost, efficiency
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            cycle_id,
            record_date.to_string(),
            planned,
            realized,
            reference_cost,
            realized * reference_cost,
            efficiency,
        ],
    )?;
    Ok(())
}

pub fn insert_addition(
    conn: &Connection,
    id: i64,
    cycle_id: i64,
    value: Option<f64>,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO rd_additions (id, cycle_id, reason, detail_total_value) VALUES (?1, ?2, 'extra event', ?3)",
        params![id, cycle_id, value],
    )?;
    Ok(())
}

pub fn set_config(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

/// Write a file into an export directory
pub fn write_export(dir: &Path, file_name: &str, content: &str) -> std::io::Result<()> {
    std::fs::write(dir.join(file_name), content)
}
