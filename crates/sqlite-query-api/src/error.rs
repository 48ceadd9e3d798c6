use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("the table name must be specified (use --table or -t)")]
    MissingTable,

    #[error("invalid table identifier: {0}")]
    InvalidTableName(String),

    #[error("table '{table}' not found in database '{}'", path.display())]
    TableNotFound { table: String, path: PathBuf },

    #[error("failed to open database: {}: {source}", path.display())]
    DbOpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("error getting table info: {0}")]
    Schema(String),

    #[error("no columns available after filtering")]
    NoColumnsAvailable,

    #[error("invalid sort column: {0}")]
    InvalidSortColumn(String),

    #[error("sorting direction must be 'asc' or 'desc', got '{0}'")]
    InvalidSortDirection(String),

    #[error("invalid limit value '{0}': must be a non-negative integer")]
    InvalidLimit(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("sql error: {0}")]
    SqlError(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::SqlError(e.to_string())
    }
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingTable => "MISSING_TABLE",
            AppError::InvalidTableName(_) => "INVALID_TABLE_NAME",
            AppError::TableNotFound { .. } => "TABLE_NOT_FOUND",
            AppError::DbOpenFailed { .. } => "DB_OPEN_FAILED",
            AppError::Schema(_) => "SCHEMA_ERROR",
            AppError::NoColumnsAvailable => "NO_COLUMNS_AVAILABLE",
            AppError::InvalidSortColumn(_) => "INVALID_SORT_COLUMN",
            AppError::InvalidSortDirection(_) => "INVALID_SORT_DIRECTION",
            AppError::InvalidLimit(_) => "INVALID_LIMIT",
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            AppError::SqlError(_) => "SQL_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NoColumnsAvailable
            | AppError::InvalidSortColumn(_)
            | AppError::InvalidSortDirection(_)
            | AppError::InvalidLimit(_)
            | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client mistakes; the process keeps serving and logs them at warn.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
            code: self.code(),
        };
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(AppError::NoColumnsAvailable.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidSortColumn("nope".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidSortDirection("up".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::InvalidLimit("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::MethodNotAllowed("POST".into()).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert!(AppError::InvalidLimit("x".into()).is_client_error());
    }

    #[test]
    fn storage_errors_map_to_500() {
        assert_eq!(
            AppError::SqlError("disk I/O error".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Schema("gone".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(!AppError::Internal("x".into()).is_client_error());
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(AppError::InvalidLimit("x".into()).code(), "INVALID_LIMIT");
        assert_eq!(AppError::NoColumnsAvailable.code(), "NO_COLUMNS_AVAILABLE");
        assert_eq!(AppError::MissingTable.code(), "MISSING_TABLE");
    }
}
