pub mod audit;
pub mod booking;
pub mod order_slip;
pub mod repositories;

// Re-export commonly used types
pub use audit::{AuditCategory, AuditEntry};
pub use booking::{Booking, BookingLine, NewBooking, NewReservation, Reservation};
pub use order_slip::{AppointedSupplier, NewAppointment, NewOrderSlip, OrderSlip, OrderSlipStatus};
pub use repositories::{
    format_booking_no, BookingStore, BookingUnitOfWork, DomainResult, SupplierAppointment,
};

pub use crate::shared::errors::DomainError;
