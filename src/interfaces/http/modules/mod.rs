pub mod appointments;
pub mod audit;
pub mod bookings;
pub mod health;
pub mod metrics;
pub mod order_slips;
pub mod request_id;
