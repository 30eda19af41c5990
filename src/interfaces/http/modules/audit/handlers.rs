use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::application::{BookingService, RequestContext};
use crate::interfaces::http::common::{error_response, ApiResponse, ApiResult};

use super::dto::AuditEntryDto;

#[derive(Clone)]
pub struct AuditState {
    pub service: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-trail",
    tag = "Audit",
    security(("user_name" = [], "company" = [])),
    responses(
        (status = 200, description = "Audit entries of the caller's company, oldest first", body = ApiResponse<Vec<AuditEntryDto>>)
    )
)]
pub async fn list_audit_trail(
    State(state): State<AuditState>,
    ctx: RequestContext,
) -> ApiResult<Vec<AuditEntryDto>> {
    let entries = state
        .service
        .list_audit_trail(&ctx)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        entries.into_iter().map(AuditEntryDto::from).collect(),
    )))
}
