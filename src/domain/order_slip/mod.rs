//! Order slip aggregate
//!
//! An order slip and the per-supplier appointments that carry its
//! reservable balance.

pub mod model;
pub mod status;

pub use model::{AppointedSupplier, NewAppointment, NewOrderSlip, OrderSlip};
pub use status::OrderSlipStatus;
