//! Booking DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{CreateBooking, EditBooking};
use crate::domain::{Booking, BookingLine, Reservation};

/// One requested booking line
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingLineRequest {
    pub appointed_id: i32,
    pub order_slip_id: i32,
    /// Must be greater than zero
    pub quantity: Decimal,
}

impl From<BookingLineRequest> for BookingLine {
    fn from(l: BookingLineRequest) -> Self {
        Self {
            appointed_id: l.appointed_id,
            order_slip_id: l.order_slip_id,
            quantity: l.quantity,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    /// Order slip the booking header is filed under
    pub order_slip_id: i32,
    pub supplier_id: i32,
    /// Load date; the booking expires a fixed number of days later
    pub load_date: NaiveDate,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub upi_reference_no: String,
    #[validate(length(max = 500))]
    pub remarks: Option<String>,
    #[validate(length(min = 1, message = "select at least one appointment"))]
    pub lines: Vec<BookingLineRequest>,
}

impl From<CreateBookingRequest> for CreateBooking {
    fn from(r: CreateBookingRequest) -> Self {
        Self {
            order_slip_id: r.order_slip_id,
            supplier_id: r.supplier_id,
            load_date: r.load_date,
            upi_reference_no: r.upi_reference_no,
            remarks: r.remarks,
            lines: r.lines.into_iter().map(BookingLine::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EditBookingRequest {
    pub supplier_id: i32,
    pub load_date: NaiveDate,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub upi_reference_no: String,
    /// Left unchanged when omitted
    #[validate(length(max = 500))]
    pub remarks: Option<String>,
    #[validate(length(min = 1, message = "select at least one appointment"))]
    pub lines: Vec<BookingLineRequest>,
}

impl From<EditBookingRequest> for EditBooking {
    fn from(r: EditBookingRequest) -> Self {
        Self {
            supplier_id: r.supplier_id,
            load_date: r.load_date,
            upi_reference_no: r.upi_reference_no,
            remarks: r.remarks,
            lines: r.lines.into_iter().map(BookingLine::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateExpiryRequest {
    pub valid_until: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    pub order_slip_id: i32,
    pub appointed_id: i32,
    pub quantity: Decimal,
    pub unserved_quantity: Decimal,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            order_slip_id: r.order_slip_id,
            appointed_id: r.appointed_id,
            quantity: r.quantity,
            unserved_quantity: r.unserved_quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub booking_no: String,
    pub order_slip_id: i32,
    pub supplier_id: i32,
    pub date: NaiveDate,
    pub valid_until: NaiveDate,
    pub upi_reference_no: String,
    pub freight: Decimal,
    pub depot: String,
    pub remarks: String,
    pub is_printed: bool,
    pub total_quantity: Decimal,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub edited_by: Option<String>,
    pub edited_at: Option<DateTime<Utc>>,
    pub reservations: Vec<ReservationDto>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            total_quantity: b.total_quantity(),
            id: b.id,
            booking_no: b.booking_no,
            order_slip_id: b.order_slip_id,
            supplier_id: b.supplier_id,
            date: b.date,
            valid_until: b.valid_until,
            upi_reference_no: b.upi_reference_no,
            freight: b.freight,
            depot: b.depot,
            remarks: b.remarks,
            is_printed: b.is_printed,
            created_by: b.created_by,
            created_at: b.created_at,
            edited_by: b.edited_by,
            edited_at: b.edited_at,
            reservations: b.reservations.into_iter().map(ReservationDto::from).collect(),
        }
    }
}
