pub mod service;

pub use service::{AppointSupplier, OrderSlipService, RegisterOrderSlip};
