// ==========================================
// Cycle Radar - data source error type
// ==========================================
// Tool: thiserror derive
// Every failure here aborts the whole analysis run.
// ==========================================

use thiserror::Error;

/// Data source layer error
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Connection / query errors =====
    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database lock acquisition failed: {0}")]
    LockError(String),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    #[error("record not found: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    // ===== Export file errors =====
    #[error("source file error ({path}): {message}")]
    SourceFileError { path: String, message: String },

    // ===== Record shape errors =====
    // Only raised for identifying keys; numeric fields are tolerated.
    #[error("invalid field value (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== Generic =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, msg) => match e.code {
                rusqlite::ErrorCode::CannotOpen
                | rusqlite::ErrorCode::NotADatabase
                | rusqlite::ErrorCode::PermissionDenied => {
                    RepositoryError::DatabaseConnectionError(
                        msg.unwrap_or_else(|| e.to_string()),
                    )
                }
                _ => RepositoryError::DatabaseQueryError(msg.unwrap_or_else(|| e.to_string())),
            },
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

impl From<csv::Error> for RepositoryError {
    fn from(err: csv::Error) -> Self {
        let path = err
            .position()
            .map(|p| format!("line {}", p.line()))
            .unwrap_or_else(|| "unknown position".to_string());
        RepositoryError::SourceFileError {
            path,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::SourceFileError {
            path: "-".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;
