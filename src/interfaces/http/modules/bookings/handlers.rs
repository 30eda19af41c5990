//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::application::{BookingService, RequestContext};
use crate::interfaces::http::common::{error_response, ApiResponse, ApiResult, ValidatedJson};

use super::dto::*;

#[derive(Clone)]
pub struct BookingState {
    pub service: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("user_name" = [], "company" = [])),
    responses(
        (status = 200, description = "Bookings of the caller's company, newest first", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn list_bookings(
    State(state): State<BookingState>,
    ctx: RequestContext,
) -> ApiResult<Vec<BookingDto>> {
    let bookings = state
        .service
        .list_bookings(&ctx)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(BookingDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    security(("user_name" = [], "company" = [])),
    params(("booking_id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking with its lines", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingState>,
    ctx: RequestContext,
    Path(booking_id): Path<i32>,
) -> ApiResult<BookingDto> {
    let booking = state
        .service
        .get_booking(&ctx, booking_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("user_name" = [], "company" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booking created", body = ApiResponse<BookingDto>),
        (status = 400, description = "No usable line or order slip closed"),
        (status = 404, description = "Order slip not found"),
        (status = 422, description = "Request body failed validation")
    )
)]
pub async fn create_booking(
    State(state): State<BookingState>,
    ctx: RequestContext,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> ApiResult<BookingDto> {
    let booking = state
        .service
        .create_booking(&ctx, request.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    security(("user_name" = [], "company" = [])),
    params(("booking_id" = i32, Path, description = "Booking ID")),
    request_body = EditBookingRequest,
    responses(
        (status = 200, description = "Booking lines replaced", body = ApiResponse<BookingDto>),
        (status = 400, description = "Booking already served, or no usable line"),
        (status = 404, description = "Booking or order slip not found")
    )
)]
pub async fn edit_booking(
    State(state): State<BookingState>,
    ctx: RequestContext,
    Path(booking_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<EditBookingRequest>,
) -> ApiResult<BookingDto> {
    let booking = state
        .service
        .edit_booking(&ctx, booking_id, request.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{booking_id}/expiry",
    tag = "Bookings",
    security(("user_name" = [], "company" = [])),
    params(("booking_id" = i32, Path, description = "Booking ID")),
    request_body = UpdateExpiryRequest,
    responses(
        (status = 200, description = "Expiry updated", body = ApiResponse<BookingDto>),
        (status = 400, description = "Expiry before the load date"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn update_expiry(
    State(state): State<BookingState>,
    ctx: RequestContext,
    Path(booking_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateExpiryRequest>,
) -> ApiResult<BookingDto> {
    let booking = state
        .service
        .update_expiry(&ctx, booking_id, request.valid_until)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{booking_id}/print",
    tag = "Bookings",
    security(("user_name" = [], "company" = [])),
    params(("booking_id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Print recorded", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn record_print(
    State(state): State<BookingState>,
    ctx: RequestContext,
    Path(booking_id): Path<i32>,
) -> ApiResult<BookingDto> {
    let booking = state
        .service
        .record_print(&ctx, booking_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}
