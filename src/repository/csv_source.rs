// ==========================================
// Cycle Radar - CSV export source
// ==========================================
// Files in the export directory:
//   cycles.csv          (required)
//   daily_records.csv   (required)
//   additions.csv       (optional)
// Columns are matched by header name, in any order.
// Empty or unparseable numeric cells read as None.
// ==========================================

use crate::domain::cycle::{Addition, Cycle, DailyRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::source::{sort_cycles_recent_first, CycleQuery, ProductionDataSource};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::PathBuf;

pub const CYCLES_FILE: &str = "cycles.csv";
pub const DAILY_RECORDS_FILE: &str = "daily_records.csv";
pub const ADDITIONS_FILE: &str = "additions.csv";

type RawRow = HashMap<String, String>;

// ==========================================
// CsvProductionSource
// ==========================================
pub struct CsvProductionSource {
    dir: PathBuf,
}

impl CsvProductionSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read a file into header -> value maps; blank lines are skipped
    fn read_rows(&self, file_name: &str) -> RepositoryResult<Vec<RawRow>> {
        let path = self.dir.join(file_name);
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| RepositoryError::SourceFileError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.iter().all(|v| v.trim().is_empty()) {
                continue;
            }
            let row: RawRow = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), v.to_string()))
                .collect();
            rows.push(row);
        }

        tracing::debug!(file = file_name, rows = rows.len(), "export file read");
        Ok(rows)
    }

    fn load_cycles(&self) -> RepositoryResult<Vec<Cycle>> {
        self.read_rows(CYCLES_FILE)?
            .iter()
            .map(|row| {
                Ok(Cycle {
                    id: required_i64(row, "id")?,
                    branch_id: required_i64(row, "branch_id")?,
                    week_start: required_date(row, "week_start")?,
                    week_end: required_date(row, "week_end")?,
                    cancelled: flag(row, "cancelled"),
                    sent_at: optional_datetime(row, "sent_at"),
                    completed_at: optional_datetime(row, "completed_at"),
                })
            })
            .collect()
    }

    fn load_records(&self) -> RepositoryResult<Vec<DailyRecord>> {
        self.read_rows(DAILY_RECORDS_FILE)?
            .iter()
            .map(|row| {
                Ok(DailyRecord {
                    cycle_id: required_i64(row, "cycle_id")?,
                    record_date: optional_date(row, "record_date"),
                    planned_quantity: optional_f64(row, "planned_quantity"),
                    realized_quantity: optional_f64(row, "realized_quantity"),
                    reference_cost: optional_f64(row, "reference_cost"),
                    realized_cost: optional_f64(row, "realized_cost"),
                    efficiency: optional_f64(row, "efficiency"),
                })
            })
            .collect()
    }

    fn load_additions(&self) -> RepositoryResult<Vec<Addition>> {
        if !self.dir.join(ADDITIONS_FILE).exists() {
            return Ok(Vec::new());
        }
        self.read_rows(ADDITIONS_FILE)?
            .iter()
            .map(|row| {
                Ok(Addition {
                    id: required_i64(row, "id")?,
                    cycle_id: required_i64(row, "cycle_id")?,
                    branch_id: optional_i64(row, "branch_id"),
                    reason: optional_text(row, "reason"),
                    description: optional_text(row, "description"),
                    detail_total_value: optional_f64(row, "detail_total_value"),
                    requested_on: optional_date(row, "requested_on"),
                    approved_at: optional_datetime(row, "approved_at"),
                    cancelled_at: optional_datetime(row, "cancelled_at"),
                })
            })
            .collect()
    }
}

#[async_trait]
impl ProductionDataSource for CsvProductionSource {
    async fn fetch_cycles(&self, query: &CycleQuery) -> RepositoryResult<Vec<Cycle>> {
        let mut cycles = self.load_cycles()?;
        sort_cycles_recent_first(&mut cycles);
        Ok(query.apply(cycles))
    }

    async fn fetch_cycle(&self, cycle_id: i64) -> RepositoryResult<Option<Cycle>> {
        Ok(self.load_cycles()?.into_iter().find(|c| c.id == cycle_id))
    }

    async fn fetch_daily_records(&self, cycle_id: Option<i64>) -> RepositoryResult<Vec<DailyRecord>> {
        let mut records: Vec<DailyRecord> = self
            .load_records()?
            .into_iter()
            .filter(|r| cycle_id.map_or(true, |id| r.cycle_id == id))
            .collect();
        // stable: file order is kept for equal or missing dates
        records.sort_by(|a, b| a.record_date.cmp(&b.record_date));
        Ok(records)
    }

    async fn fetch_additions(&self, cycle_id: Option<i64>) -> RepositoryResult<Vec<Addition>> {
        Ok(self
            .load_additions()?
            .into_iter()
            .filter(|a| cycle_id.map_or(true, |id| a.cycle_id == id))
            .collect())
    }
}

// ==========================================
// Cell parsing
// ==========================================

fn cell<'a>(row: &'a RawRow, field: &str) -> Option<&'a str> {
    row.get(field).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn field_error(field: &str, message: impl Into<String>) -> RepositoryError {
    RepositoryError::FieldValueError {
        field: field.to_string(),
        message: message.into(),
    }
}

fn required_i64(row: &RawRow, field: &str) -> RepositoryResult<i64> {
    let raw = cell(row, field).ok_or_else(|| field_error(field, "missing value"))?;
    raw.parse::<i64>()
        .map_err(|e| field_error(field, format!("'{}': {}", raw, e)))
}

fn required_date(row: &RawRow, field: &str) -> RepositoryResult<NaiveDate> {
    let raw = cell(row, field).ok_or_else(|| field_error(field, "missing value"))?;
    parse_date(raw).ok_or_else(|| field_error(field, format!("'{}' is not a date", raw)))
}

fn optional_i64(row: &RawRow, field: &str) -> Option<i64> {
    cell(row, field).and_then(|v| v.parse().ok())
}

fn optional_f64(row: &RawRow, field: &str) -> Option<f64> {
    cell(row, field)
        .and_then(|v| v.replace(',', ".").parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn optional_text(row: &RawRow, field: &str) -> Option<String> {
    cell(row, field).map(str::to_string)
}

fn optional_date(row: &RawRow, field: &str) -> Option<NaiveDate> {
    cell(row, field).and_then(parse_date)
}

fn optional_datetime(row: &RawRow, field: &str) -> Option<NaiveDateTime> {
    cell(row, field).and_then(parse_datetime)
}

fn flag(row: &RawRow, field: &str) -> bool {
    matches!(
        cell(row, field).map(str::to_lowercase).as_deref(),
        Some("1" | "true" | "t" | "yes" | "y")
    )
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    // timestamps are cut to their date part
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| parse_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0)))
}
