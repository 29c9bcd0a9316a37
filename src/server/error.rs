use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Every failure a handler can report. Rendered as `{"message": ...}`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation(_) | AppError::Conflict(_) | AppError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match self {
            AppError::Store(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                "internal server error".to_owned()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<crate::auth::password::Error> for AppError {
    fn from(error: crate::auth::password::Error) -> Self {
        AppError::Internal(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        AppError::Internal(error.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> Self {
        AppError::Internal(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("x".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (AppError::Unauthorized("No token"), StatusCode::UNAUTHORIZED),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Store(sqlx::Error::PoolClosed), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
