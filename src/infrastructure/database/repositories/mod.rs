//! Database repository implementations

mod conversions;

pub mod booking_store;

pub use booking_store::{SeaOrmBookingStore, SeaOrmUnitOfWork};
