//! JSON extractor that also runs `validator` rules
//!
//! Malformed bodies are answered with 400, bodies that parse but break a
//! field rule with 422. Both use the [`ApiResponse`] envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiResponse;

/// `axum::Json<T>` plus `Validate::validate()` on the decoded value.
///
/// ```ignore
/// async fn create(ValidatedJson(body): ValidatedJson<CreateBookingRequest>) { .. }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    Json(JsonRejection),
    Invalid(ValidationErrors),
}

/// Flatten field errors into `field: message` pairs joined by `; `.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(m) => format!("{}: {}", field, m),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    parts.sort();

    if parts.is_empty() {
        "Validation failed".to_string()
    } else {
        parts.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Json(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON: {}", rejection.body_text()),
            ),
            Self::Invalid(errors) => (StatusCode::UNPROCESSABLE_ENTITY, describe(&errors)),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;
        value.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Slip {
        #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
        order_slip_no: String,
        #[validate(length(min = 1))]
        lines: Vec<u32>,
    }

    async fn handler(ValidatedJson(slip): ValidatedJson<Slip>) -> String {
        slip.order_slip_no
    }

    async fn post_json(body: &str) -> Response {
        let req = Request::builder()
            .method("POST")
            .uri("/slips")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        Router::new()
            .route("/slips", post(handler))
            .oneshot(req)
            .await
            .unwrap()
    }

    async fn error_of(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: ApiResponse<()> = serde_json::from_slice(&bytes).unwrap();
        body.error.unwrap_or_default()
    }

    #[tokio::test]
    async fn valid_body_reaches_the_handler() {
        let resp = post_json(r#"{"order_slip_no":"OS-1","lines":[1]}"#).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let resp = post_json("{not json").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(error_of(resp).await.starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn rule_violations_are_listed_per_field() {
        let resp = post_json(r#"{"order_slip_no":"","lines":[]}"#).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            error_of(resp).await,
            "lines: length; order_slip_no: must be 1-20 characters"
        );
    }
}
