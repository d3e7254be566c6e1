// ==========================================
// Cycle Radar - API error type
// ==========================================
// Converts data source errors into the single user-facing
// failure of an analysis run.
// ==========================================

use crate::i18n::t_for;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API layer error
#[derive(Error, Debug)]
pub enum ApiError {
    /// Data source unavailable or failed: the whole run aborts
    #[error("data source error: {0}")]
    DataSourceError(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Localized message for the dashboard
    pub fn user_message(&self, locale: &str) -> String {
        let (key, detail) = match self {
            ApiError::DataSourceError(msg) => ("error.data_source", msg.clone()),
            ApiError::NotFound(msg) => ("error.not_found", msg.clone()),
            ApiError::InvalidInput(msg) => ("error.invalid_input", msg.clone()),
            ApiError::InternalError(msg) => ("error.internal", msg.clone()),
            ApiError::Other(err) => ("error.internal", err.to_string()),
        };
        t_for(locale, key, &[("detail", &detail)])
    }
}

// ==========================================
// From RepositoryError
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::InternalError(format!("database lock failed: {}", msg))
            }
            RepositoryError::Other(e) => ApiError::Other(e),
            other => ApiError::DataSourceError(other.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
