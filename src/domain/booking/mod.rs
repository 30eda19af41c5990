//! Booking aggregate
//!
//! A booking exclusively owns its reservations; edits replace the whole set.

pub mod model;

pub use model::{Booking, BookingLine, NewBooking, NewReservation, Reservation};
