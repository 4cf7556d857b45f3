use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(DbErr),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        match e {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::StoreUnavailable(e),
            other => Self::Database(other),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Database(db) => db.into(),
            StoreError::OutageNotFound(_) => Self::NotFound(e.to_string()),
            StoreError::OutageAlreadyResolved(_) => Self::Conflict(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Database(e) => {
                tracing::error!("Database error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            Self::StoreUnavailable(e) => {
                tracing::error!("Store unavailable: {e:?}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Store unavailable".to_string(),
                )
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn store_errors_map_to_http_statuses() {
        let not_found = AppError::from(StoreError::OutageNotFound(7)).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let conflict = AppError::from(StoreError::OutageAlreadyResolved(7)).into_response();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let database =
            AppError::from(StoreError::Database(DbErr::Custom("boom".into()))).into_response();
        assert_eq!(database.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let unavailable = AppError::from(StoreError::Database(DbErr::Conn(
            RuntimeErr::Internal("connection refused".into()),
        )))
        .into_response();
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
