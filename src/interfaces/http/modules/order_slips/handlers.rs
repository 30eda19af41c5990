//! Order slip HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::application::{OrderSlipService, RequestContext};
use crate::interfaces::http::common::{error_response, ApiResponse, ApiResult, ValidatedJson};

use super::dto::*;

#[derive(Clone)]
pub struct OrderSlipState {
    pub service: Arc<OrderSlipService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/order-slips",
    tag = "Order Slips",
    security(("user_name" = [], "company" = [])),
    request_body = RegisterOrderSlipRequest,
    responses(
        (status = 200, description = "Order slip registered", body = ApiResponse<OrderSlipDto>),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Order slip number already used")
    )
)]
pub async fn register_order_slip(
    State(state): State<OrderSlipState>,
    ctx: RequestContext,
    ValidatedJson(request): ValidatedJson<RegisterOrderSlipRequest>,
) -> ApiResult<OrderSlipDto> {
    let slip = state
        .service
        .register_order_slip(&ctx, request.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(slip.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/order-slips/{order_slip_id}/appointments",
    tag = "Order Slips",
    security(("user_name" = [], "company" = [])),
    params(("order_slip_id" = i32, Path, description = "Order slip ID")),
    request_body = AppointSupplierRequest,
    responses(
        (status = 200, description = "Supplier appointed", body = ApiResponse<AppointmentDto>),
        (status = 400, description = "Non-positive quantity or closed order slip"),
        (status = 404, description = "Order slip not found")
    )
)]
pub async fn appoint_supplier(
    State(state): State<OrderSlipState>,
    ctx: RequestContext,
    Path(order_slip_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<AppointSupplierRequest>,
) -> ApiResult<AppointmentDto> {
    let appointment = state
        .service
        .appoint_supplier(&ctx, order_slip_id, request.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(appointment.into())))
}
