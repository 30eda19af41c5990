//! Order-slip ledger, read side
//!
//! Lists the appointments a booking may draw from, optionally as seen by
//! a booking that is being edited.

pub mod queries;

pub use queries::{AppointmentQueries, AvailableAppointment};
