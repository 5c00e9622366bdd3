use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use sea_orm::DbErr;
use serde::Serialize;

/// One offending field in a rejected payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    /// Field name as it appears in the request body.
    #[schema(example = "title")]
    pub field: String,
    #[schema(example = "must not be empty")]
    pub message: String,
}

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `TOKEN_MISSING`,
    /// `TOKEN_INVALID`, `INVALID_CREDENTIALS`, `NOT_FOUND`, `NOT_CONFIGURED`,
    /// `CONFIGURATION_ERROR`, `UPSTREAM_ERROR`, `STORAGE_ERROR`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Request body has invalid fields")]
    pub message: String,
    /// Offending fields, present on field-level validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    InvalidFields(Vec<FieldError>),
    TokenMissing,
    TokenInvalid,
    InvalidCredentials,
    NotFound(String),
    /// A required backing service (database, object store) is not configured.
    NotConfigured(String),
    /// Configuration is present but unusable, e.g. no public base URL when a
    /// media URL has to be resolved.
    Configuration(String),
    /// The relational store rejected or failed a query.
    Upstream(String),
    Storage(String),
    Internal(String),
}

impl AppError {
    fn body(code: &'static str, message: String) -> ErrorBody {
        ErrorBody {
            code,
            message,
            details: None,
        }
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Self::body("VALIDATION_ERROR", msg),
            ),
            AppError::InvalidFields(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: "Request body has invalid fields".into(),
                    details: Some(fields),
                },
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                Self::body("TOKEN_MISSING", "Authentication required".into()),
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                Self::body("TOKEN_INVALID", "Invalid or expired token".into()),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Self::body("INVALID_CREDENTIALS", "Invalid username or password".into()),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, Self::body("NOT_FOUND", msg)),
            AppError::NotConfigured(msg) => {
                tracing::error!("Service not configured: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Self::body("NOT_CONFIGURED", msg),
                )
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::body("CONFIGURATION_ERROR", msg),
                )
            }
            AppError::Upstream(detail) => {
                tracing::error!("Upstream store error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::body("UPSTREAM_ERROR", detail),
                )
            }
            AppError::Storage(detail) => {
                tracing::error!("Object storage error: {}", detail);
                (StatusCode::BAD_GATEWAY, Self::body("STORAGE_ERROR", detail))
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::body("INTERNAL_ERROR", detail),
                )
            }
        }
    }

    /// Errors a read path may swallow: the store is missing or a query failed.
    pub fn is_degradable(&self) -> bool {
        matches!(self, AppError::NotConfigured(_) | AppError::Upstream(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(path) => AppError::NotFound(format!("Object '{path}' not found")),
            StorageError::InvalidPath(msg) => AppError::Validation(msg),
            StorageError::SizeLimitExceeded { .. } => AppError::Validation(err.to_string()),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Turn a failed read into an empty result when the failure is a missing or
/// failing store. Anything else (validation, configuration) still propagates.
pub fn degrade<T: Default>(result: Result<T, AppError>, what: &str) -> Result<T, AppError> {
    match result {
        Err(e) if e.is_degradable() => {
            tracing::warn!(read = what, error = ?e, "Read degraded to empty result");
            Ok(T::default())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrade_swallows_store_failures() {
        let missing: Result<Vec<i32>, _> = Err(AppError::NotConfigured("db".into()));
        assert_eq!(degrade(missing, "list").unwrap(), Vec::<i32>::new());

        let failed: Result<Option<i32>, _> = Err(AppError::Upstream("timeout".into()));
        assert_eq!(degrade(failed, "active").unwrap(), None);
    }

    #[test]
    fn degrade_keeps_other_errors() {
        let cfg: Result<Vec<i32>, _> = Err(AppError::Configuration("no base url".into()));
        assert!(matches!(
            degrade(cfg, "list"),
            Err(AppError::Configuration(_))
        ));
        assert_eq!(degrade(Ok(vec![1]), "list").unwrap(), vec![1]);
    }

    #[test]
    fn invalid_fields_are_listed() {
        let (status, body) = AppError::InvalidFields(vec![FieldError {
            field: "title".into(),
            message: "must not be empty".into(),
        }])
        .status_and_body();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "VALIDATION_ERROR");
        assert_eq!(body.details.unwrap()[0].field, "title");
    }

    #[test]
    fn upstream_message_is_surfaced() {
        let (status, body) = AppError::from(DbErr::Custom("boom".into())).status_and_body();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "UPSTREAM_ERROR");
        assert!(body.message.contains("boom"));
    }
}
