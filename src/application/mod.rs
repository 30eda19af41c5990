//! Application layer: use cases over the order-slip ledger
//!
//! - `ledger`: read-only appointment availability
//! - `booking`: the reservation engine (create / edit / expiry / print)
//! - `order_slips`: registering slips and appointing suppliers

pub mod booking;
pub mod context;
pub mod ledger;
pub mod order_slips;

mod unit_of_work;

pub use booking::{BookingService, CreateBooking, EditBooking};
pub use context::RequestContext;
pub use ledger::{AppointmentQueries, AvailableAppointment};
pub use order_slips::{AppointSupplier, OrderSlipService, RegisterOrderSlip};
