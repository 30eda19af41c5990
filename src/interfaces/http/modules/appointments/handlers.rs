//! Appointment HTTP handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use crate::application::{AppointmentQueries, RequestContext};
use crate::interfaces::http::common::{error_response, ApiResponse, ApiResult};

use super::dto::*;

#[derive(Clone)]
pub struct AppointmentState {
    pub queries: Arc<AppointmentQueries>,
}

#[utoipa::path(
    get,
    path = "/api/v1/appointments",
    tag = "Appointments",
    security(("user_name" = [], "company" = [])),
    params(AvailableAppointmentsQuery),
    responses(
        (status = 200, description = "Appointments with quantity left to book", body = ApiResponse<Vec<AvailableAppointmentDto>>),
        (status = 401, description = "Missing caller headers"),
        (status = 404, description = "Booking under edit not found")
    )
)]
pub async fn list_available_appointments(
    State(state): State<AppointmentState>,
    ctx: RequestContext,
    Query(query): Query<AvailableAppointmentsQuery>,
) -> ApiResult<Vec<AvailableAppointmentDto>> {
    let rows = match query.booking_id {
        Some(booking_id) => {
            state
                .queries
                .list_available_for_edit(&ctx, query.supplier_id, query.load_point_id, booking_id)
                .await
        }
        None => {
            state
                .queries
                .list_available(&ctx, query.supplier_id, query.load_point_id)
                .await
        }
    }
    .map_err(error_response)?;

    Ok(Json(ApiResponse::success(
        rows.into_iter().map(AvailableAppointmentDto::from).collect(),
    )))
}
