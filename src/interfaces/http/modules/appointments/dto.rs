//! Appointment DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::AvailableAppointment;

/// Query for the appointments a booking line may draw from
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailableAppointmentsQuery {
    pub supplier_id: i32,
    /// Pick-up point of the order slip
    pub load_point_id: i32,
    /// Booking being edited; its own reservations count as available
    pub booking_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailableAppointmentDto {
    pub appointed_id: i32,
    pub order_slip_id: i32,
    pub order_slip_no: String,
    pub remaining_quantity: Decimal,
    pub purchase_order_no: Option<String>,
}

impl From<AvailableAppointment> for AvailableAppointmentDto {
    fn from(a: AvailableAppointment) -> Self {
        Self {
            appointed_id: a.appointed_id,
            order_slip_id: a.order_slip_id,
            order_slip_no: a.order_slip_no,
            remaining_quantity: a.remaining_quantity,
            purchase_order_no: a.purchase_order_no,
        }
    }
}
