//! Caller claims extractor
//!
//! Authentication happens upstream; this service trusts the user name and
//! company forwarded in request headers and turns them into a
//! [`RequestContext`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;

use super::ApiResponse;
use crate::application::RequestContext;

pub const USER_HEADER: &str = "x-user-name";
pub const COMPANY_HEADER: &str = "x-company";

fn header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiResponse<()>>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match (header(parts, USER_HEADER), header(parts, COMPANY_HEADER)) {
            (Some(user_name), Some(company)) => Ok(RequestContext::new(user_name, company)),
            _ => Err((
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error(format!(
                    "Missing {} or {} header",
                    USER_HEADER, COMPANY_HEADER
                ))),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    async fn whoami(ctx: RequestContext) -> String {
        format!("{}@{}", ctx.user_name, ctx.company)
    }

    fn app() -> Router {
        Router::new().route("/whoami", get(whoami))
    }

    #[tokio::test]
    async fn both_headers_build_a_context() {
        let req = Request::builder()
            .uri("/whoami")
            .header(USER_HEADER, "jdoe")
            .header(COMPANY_HEADER, "Filpride")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"jdoe@Filpride");
    }

    #[tokio::test]
    async fn missing_or_blank_company_is_unauthorized() {
        let req = Request::builder()
            .uri("/whoami")
            .header(USER_HEADER, "jdoe")
            .header(COMPANY_HEADER, "  ")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
