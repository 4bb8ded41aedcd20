use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::assessment::FieldIssue;
use crate::recommendation::EngineError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldIssue>,
    },

    #[error("Invalid assessment path: {0}")]
    InvalidPath(String),

    #[error("No eligible careers: {0}")]
    NoEligibleCareers(String),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Path(e) => AppError::InvalidPath(e.to_string()),
            EngineError::Validation(e) => AppError::Validation {
                message: e.to_string(),
                fields: e.issues,
            },
            EngineError::NoEligibleCareers(e) => AppError::NoEligibleCareers(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            AppError::Validation { message, fields } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                message,
                Some(fields),
            ),
            AppError::InvalidPath(msg) => (StatusCode::BAD_REQUEST, "INVALID_PATH", msg, None),
            AppError::NoEligibleCareers(msg) => {
                tracing::warn!("No eligible careers: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "NO_ELIGIBLE_CAREERS",
                    msg,
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(fields) = fields {
            error["fields"] = json!(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{AssessmentPath, PathError, ValidationError};
    use crate::matching::NoEligibleCareers;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err: AppError =
            EngineError::Validation(ValidationError::single("zip_code", "must be 5 digits")).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_path_conflict_maps_to_bad_request() {
        let err: AppError = EngineError::Path(PathError::Conflict {
            requested: AssessmentPath::Decided,
            answered: AssessmentPath::Undecided,
        })
        .into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_no_eligible_maps_to_unprocessable() {
        let err: AppError = EngineError::NoEligibleCareers(NoEligibleCareers {
            path: AssessmentPath::Decided,
            reason: "filtered".to_string(),
        })
        .into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
