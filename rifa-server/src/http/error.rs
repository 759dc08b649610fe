//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses in the contract shape
//! `{success: false, error: <message>}` with the status code carried by
//! the taxonomy: validation/precondition 400, not-found 404,
//! conflict/invalid-state 409, storage 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::LedgerError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request field missing or malformed (400)
    Validation(ValidationError),

    /// Slot not in the state the transition expects (409)
    Conflict { message: String },

    /// Referenced slot/order/winner/scope absent (404)
    NotFound { message: String },

    /// Draw attempted before the raffle is ready (400)
    Precondition { message: String },

    /// Storage failure (500, logged, generic message on the wire)
    Storage(LedgerError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Conflict { message } => (StatusCode::CONFLICT, message.clone()),
            Self::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            Self::Precondition { message } => (StatusCode::BAD_REQUEST, message.clone()),
            Self::Storage(e) => {
                // Log the actual error, return a generic message
                tracing::error!("storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_owned(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        match &e {
            LedgerError::Conflict { .. } | LedgerError::InvalidState { .. } => Self::Conflict {
                message: e.to_string(),
            },
            LedgerError::NotFound { .. } => Self::NotFound {
                message: e.to_string(),
            },
            LedgerError::Precondition { .. } => Self::Precondition {
                message: e.to_string(),
            },
            LedgerError::Storage(_) => Self::Storage(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use rifa_core::SlotStatus;

    use super::*;

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "nomeId" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn conflict_is_409() {
        let err = ApiError::from(LedgerError::Conflict {
            slot_id: 1,
            current: SlotStatus::Reserved,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn invalid_state_is_409() {
        let err = ApiError::from(LedgerError::InvalidState {
            slot_id: 1,
            current: SlotStatus::Sold,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::from(LedgerError::NotFound {
            resource: "slot",
            id: "9".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn precondition_is_400() {
        let err = ApiError::from(LedgerError::Precondition {
            reason: "2 of 3 slots not yet sold".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn storage_is_500_with_generic_body() {
        let err = ApiError::from(LedgerError::Storage(sqlx::Error::PoolClosed));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "an internal error occurred");
    }
}
