//! Database entities module

pub mod appointed_supplier;
pub mod audit_trail;
pub mod booking;
pub mod booking_line;
pub mod booking_sequence;
pub mod order_slip;

pub use appointed_supplier::Entity as AppointedSupplier;
pub use audit_trail::Entity as AuditTrail;
pub use booking::Entity as Booking;
pub use booking_line::Entity as BookingLine;
pub use booking_sequence::Entity as BookingSequence;
pub use order_slip::Entity as OrderSlip;
