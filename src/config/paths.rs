// ==========================================
// Cycle Radar - dataset location
// ==========================================
// Order: CYCLE_RADAR_DB_PATH env var > CLI argument > user data dir
// ==========================================

use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CYCLE_RADAR_DB_PATH";
pub const DB_FILE_NAME: &str = "cycle_radar.db";

/// Resolve the dataset path
///
/// The directory is never created: the dataset is synced in by another job.
pub fn resolve_db_path(cli_arg: Option<&str>) -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    if let Some(arg) = cli_arg.map(str::trim).filter(|a| !a.is_empty()) {
        return arg.to_string();
    }

    default_db_path()
}

/// `<data_dir>/cycle-radar/cycle_radar.db`, or the working directory as fallback
pub fn default_db_path() -> String {
    let path = match dirs::data_dir() {
        Some(data_dir) => data_dir.join("cycle-radar").join(DB_FILE_NAME),
        None => PathBuf::from(".").join(DB_FILE_NAME),
    };
    path.to_string_lossy().to_string()
}
