//! Shared HTTP building blocks: response envelope, error mapping, extractors

pub mod claims;
pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use claims::{COMPANY_HEADER, USER_HEADER};
pub use validated_json::ValidatedJson;

/// Standard API response envelope
///
/// Every REST endpoint answers with this wrapper.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "data": null, "error": "message"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Handler result: the envelope on success, a status plus envelope on failure.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a domain error into the failure half of [`ApiResult`].
///
/// The message of the failure is passed to the caller as is, storage
/// failures included.
pub fn error_response<T>(error: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = status_for(&error);
    let message = match error {
        DomainError::Validation(m)
        | DomainError::Conflict(m)
        | DomainError::Forbidden(m)
        | DomainError::Storage(m) => m,
        e @ DomainError::NotFound { .. } => e.to_string(),
    };
    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_http_statuses() {
        assert_eq!(
            status_for(&DomainError::not_found("Booking", "id", 1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DomainError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(&DomainError::Conflict("dup".into())), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&DomainError::Storage("disk".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn storage_failure_message_reaches_the_caller() {
        let (status, Json(body)) = error_response::<()>(DomainError::Storage(
            "Database error: database is locked".into(),
        ));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("Database error: database is locked"));
    }

    #[test]
    fn validation_message_is_passed_through() {
        let (_, Json(body)) = error_response::<()>(DomainError::Validation(
            "Authority to load #ATL0000000001 has already been served".into(),
        ));
        assert_eq!(
            body.error.as_deref(),
            Some("Authority to load #ATL0000000001 has already been served")
        );
    }
}
