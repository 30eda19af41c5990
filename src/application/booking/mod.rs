//! Reservation engine: bookings against the order-slip ledger

pub mod commands;
pub mod service;

pub use commands::{CreateBooking, EditBooking};
pub use service::BookingService;
